//! Submission records and the status-to-message mapping.
//!
//! The API returns each homework as a loose JSON object. [`Submission`]
//! extracts the two fields the bot cares about, and [`parse_status`] turns a
//! record into the notification text sent to the chat.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{HomeworkBotError, Result};

/// Review status of a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    /// The reviewer accepted the work.
    Approved,
    /// A reviewer picked the work up.
    Reviewing,
    /// The reviewer left remarks.
    Rejected,
}

impl HomeworkStatus {
    /// Fixed human-readable verdict for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkBotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(HomeworkBotError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single homework review record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub status: HomeworkStatus,
}

impl Submission {
    /// Notification text announcing this submission's status.
    pub fn status_message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

impl TryFrom<&Value> for Submission {
    type Error = HomeworkBotError;

    fn try_from(homework: &Value) -> Result<Self> {
        let name = homework
            .get("homework_name")
            .ok_or(HomeworkBotError::Field("homework_name"))?;
        let status = homework
            .get("status")
            .ok_or(HomeworkBotError::Field("status"))?;

        let status = match status {
            Value::String(s) => s.parse::<HomeworkStatus>()?,
            other => return Err(HomeworkBotError::UnknownStatus(other.to_string())),
        };

        Ok(Self {
            name: text_of(name),
            status,
        })
    }
}

/// Build the notification text for a raw homework record.
///
/// Fails with [`HomeworkBotError::Field`] when `homework_name` or `status`
/// is missing and with [`HomeworkBotError::UnknownStatus`] for any status
/// outside [`HomeworkStatus`].
pub fn parse_status(homework: &Value) -> Result<String> {
    Submission::try_from(homework).map(|s| s.status_message())
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
