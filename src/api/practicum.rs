use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::api::HomeworkApi;
use crate::error::{HomeworkBotError, Result};

/// Production endpoint of the Practicum homework status API.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Fetches homework statuses from the Practicum API with an OAuth token.
pub struct PracticumClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            endpoint,
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, since: i64) -> Result<Value> {
        debug!("requesting {} from_date={}", self.endpoint, since);

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            let body = resp.text().await.unwrap_or_default();
            return Err(HomeworkBotError::StatusCode {
                code: status.as_u16(),
                reason,
                body,
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}
