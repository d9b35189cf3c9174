//! Runtime configuration.
//!
//! Secrets never live in the config file: [`Credentials`] are read from the
//! environment (after `.env` has been loaded by the binary). Everything else
//! has a working default and may be overridden by an optional TOML file.
//!
//! # Example `homework_bot.toml`
//!
//! ```toml
//! [api]
//! endpoint = "https://practicum.yandex.ru/api/user_api/homework_statuses/"
//!
//! [telegram]
//! api_base = "https://api.telegram.org"
//!
//! [poller]
//! retry_period_secs = 600
//!
//! [logging]
//! file = "${HOME}/homework_bot.log"
//! level = "homework_bot=debug"
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::api::practicum::DEFAULT_ENDPOINT;
use crate::error::{HomeworkBotError, Result};
use crate::notification::telegram::TELEGRAM_API_BASE;
use crate::poller::DEFAULT_RETRY_PERIOD;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot cannot run without.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth token for the Practicum API.
    pub practicum_token: String,
    /// Bot API token from @BotFather.
    pub telegram_token: String,
    /// Destination chat ID.
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, treating blank values as missing.
    ///
    /// The error lists every missing variable, not just the first one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name.to_string());
                String::new()
            }
        };

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(HomeworkBotError::MissingCredentials(missing));
        }
        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

/// Homework API settings (`[api]` section).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Telegram Bot API settings (`[telegram]` section).
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_telegram_api_base(),
        }
    }
}

/// Poll loop settings (`[poller]` section).
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Seconds to sleep between polls.
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            retry_period_secs: default_retry_period_secs(),
        }
    }
}

/// Log sink settings (`[logging]` section).
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// File that receives a copy of every log line (appended).
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

/// Top-level configuration deserialized from `homework_bot.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and parse the configuration from a TOML file at the given path.
    ///
    /// `${VAR}` and `$VAR` placeholders are replaced with environment values
    /// before parsing; an unset variable is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = substitute_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that parse but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.poller.retry_period_secs == 0 {
            return Err(HomeworkBotError::InvalidConfig(
                "poller.retry_period_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Like [`load_from_path`](Self::load_from_path), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.poller.retry_period_secs)
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_telegram_api_base() -> String {
    TELEGRAM_API_BASE.to_string()
}

fn default_retry_period_secs() -> u64 {
    DEFAULT_RETRY_PERIOD.as_secs()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("homework_bot.log")
}

fn default_log_level() -> String {
    "homework_bot=debug".to_string()
}

// Braced names may be mixed case; bare names are upper case only so that
// ordinary `$` text survives.
static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Z_][A-Z0-9_]*)")
        .expect("placeholder pattern is valid")
});

/// Replace `${VAR}` and `$VAR` placeholders with environment variable values.
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for caps in ENV_PLACEHOLDER.captures_iter(input) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let name = placeholder_name(&caps);
        let value =
            std::env::var(name).map_err(|_| HomeworkBotError::ConfigEnvVar(name.to_string()))?;
        output.push_str(&input[last..whole.start]);
        output.push_str(&value);
        last = whole.end;
    }

    output.push_str(&input[last..]);
    Ok(output)
}

fn placeholder_name<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default()
}
