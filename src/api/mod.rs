//! Homework status API: the fetch seam and payload validation.
//!
//! The [`HomeworkApi`] trait abstracts over the remote service so the poll
//! loop can be driven by a stub in tests. The only production backend is
//! [`practicum::PracticumClient`].
//!
//! Payloads are kept as raw [`serde_json::Value`]s: [`check_response`]
//! verifies the outer shape and leaves individual records to
//! [`crate::homework::parse_status`].

pub mod practicum;

use serde_json::Value;

use crate::error::{HomeworkBotError, Result};

/// Source of homework status payloads.
#[async_trait::async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch every status change since the `since` Unix timestamp.
    async fn fetch(&self, since: i64) -> Result<Value>;
}

/// Validate the payload shape and return the `homeworks` array.
///
/// Records are returned unchanged, most recent first.
pub fn check_response(payload: &Value) -> Result<&[Value]> {
    let map = payload
        .as_object()
        .ok_or(HomeworkBotError::Shape("Ответ API — не словарь"))?;
    let homeworks = map
        .get("homeworks")
        .ok_or(HomeworkBotError::Shape("Ключ \"homeworks\" отсутствует в ответе API"))?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(HomeworkBotError::Shape("\"homeworks\" должен быть списком"))
}

/// The server-reported `current_date`, used as the next watermark.
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get("current_date").and_then(Value::as_i64)
}
