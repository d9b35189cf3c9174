//! The poll loop: fetch, validate, format, notify, sleep.
//!
//! [`Poller`] owns the loop state ([`PollState`]) and drives one cycle at a
//! time through [`Poller::run_cycle`]. [`Poller::run`] repeats cycles forever
//! with a fixed pause in between; the process is stopped from outside.
//!
//! Every failure inside a cycle is turned into a chat message prefixed with
//! [`FAILURE_PREFIX`] and deduplicated against the last delivered message,
//! exactly like a status change.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, error, info};

use crate::api::{check_response, current_date, HomeworkApi};
use crate::error::{HomeworkBotError, Result};
use crate::homework::parse_status;
use crate::notification::{send_message, Notifier};

/// Pause between two polls.
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Banner in front of every failure notification.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Mutable state carried from one cycle to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Watermark passed as `from_date` on the next request.
    pub timestamp: i64,
    /// Most recently delivered message; empty until the first delivery.
    pub last_message: String,
}

/// What a single cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Delivered,
    /// The newest status matches the last delivered message.
    Unchanged,
    /// The API reported no homeworks since the watermark.
    NoHomeworks,
    /// A new status message could not be delivered.
    DeliveryFailed,
    /// Fetching, validating or formatting failed.
    Failed {
        /// Full failure message, including [`FAILURE_PREFIX`].
        message: String,
        /// Whether the failure message reached the chat in this cycle.
        notified: bool,
    },
}

/// Drives the fetch-and-notify cycle against an API and a notifier.
pub struct Poller<A, N> {
    api: A,
    notifier: N,
    retry_period: Duration,
    state: PollState,
}

impl<A: HomeworkApi, N: Notifier> Poller<A, N> {
    /// Create a poller whose watermark starts at the current time.
    pub fn new(api: A, notifier: N, retry_period: Duration) -> Self {
        Self {
            api,
            notifier,
            retry_period,
            state: PollState {
                timestamp: unix_now(),
                last_message: String::new(),
            },
        }
    }

    /// Override the starting watermark.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.state.timestamp = timestamp;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    /// Run cycles forever, sleeping `retry_period` after each one.
    pub async fn run(mut self) {
        info!(
            "polling every {}s starting from {}",
            self.retry_period.as_secs(),
            self.state.timestamp
        );
        loop {
            let outcome = self.run_cycle().await;
            debug!(?outcome, "cycle finished");
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Run one poll cycle. Never fails: errors become failure notifications.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(outcome) => outcome,
            Err(err) => self.report_failure(err).await,
        }
    }

    async fn poll(&mut self) -> Result<CycleOutcome> {
        let payload = self.api.fetch(self.state.timestamp).await?;
        let homeworks = check_response(&payload)?;

        let outcome = match homeworks.first() {
            Some(latest) => {
                let message = parse_status(latest)?;
                self.deliver(message).await
            }
            None => {
                debug!("no new statuses in API response");
                CycleOutcome::NoHomeworks
            }
        };

        if let Some(date) = current_date(&payload) {
            self.state.timestamp = date;
        }
        Ok(outcome)
    }

    async fn report_failure(&mut self, err: HomeworkBotError) -> CycleOutcome {
        let message = format!("{}: {}", FAILURE_PREFIX, err);
        error!("{}", message);
        let notified = self.deliver(message.clone()).await == CycleOutcome::Delivered;
        CycleOutcome::Failed { message, notified }
    }

    async fn deliver(&mut self, message: String) -> CycleOutcome {
        if message == self.state.last_message {
            debug!("status unchanged, nothing to send");
            return CycleOutcome::Unchanged;
        }
        if send_message(&self.notifier, &message).await {
            self.state.last_message = message;
            CycleOutcome::Delivered
        } else {
            CycleOutcome::DeliveryFailed
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
