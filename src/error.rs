use thiserror::Error;

/// Unified error type for the homework bot.
///
/// Display strings are user-facing: failures caught by the poll loop are
/// forwarded to the chat verbatim, prefixed with the failure banner.
#[derive(Debug, Error)]
pub enum HomeworkBotError {
    /// The API payload does not have the expected structure.
    #[error("{0}")]
    Shape(&'static str),

    /// A submission record lacks a required key.
    #[error("В ответе отсутствует ключ '{0}'")]
    Field(&'static str),

    /// A submission carries a status outside the documented set.
    #[error("Недокументированный статус: {0}")]
    UnknownStatus(String),

    /// Network, timeout, DNS, or body decoding failure.
    #[error("Ошибка запроса к API: {}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// The API answered with something other than 200 OK.
    #[error("Эндпоинт недоступен. Код ответа: {code}. Причина: {reason}. Ответ: {body}")]
    StatusCode {
        code: u16,
        reason: String,
        body: String,
    },

    /// The chat backend rejected or failed to receive a message.
    #[error("Ошибка при отправке сообщения в Telegram: {0}")]
    Delivery(String),

    #[error("Отсутствуют переменные окружения: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Environment variable not set: {0}")]
    ConfigEnvVar(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, HomeworkBotError>;

/// Render `err` followed by every `source()` below it, joined with `": "`.
///
/// reqwest's own message stops at "error sending request"; the cause
/// (refused connection, DNS, timeout) lives further down the chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
