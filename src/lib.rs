//! # homework-bot
//!
//! **Telegram relay for Practicum homework review statuses.**
//!
//! The bot polls the Practicum `homework_statuses` API every ten minutes,
//! picks the most recent submission, and sends a message to a Telegram chat
//! whenever its review status changes. Failures are reported to the same chat,
//! once per distinct error.
//!
//! ## Architecture
//!
//! - **[`api`]** — `HomeworkApi` trait, Practicum HTTP client, payload validation
//! - **[`homework`]** — status enum and status-to-message formatting
//! - **[`notification`]** — `Notifier` trait and the Telegram backend
//! - **[`poller`]** — the fetch/notify/sleep loop and its state
//! - **[`config`]** — credentials from the environment, optional TOML settings
//! - **[`logging`]** — stdout + file log sinks via `tracing`
//! - **[`cli`]** — command-line interface (clap)
//! - **[`error`]** — unified error type using `thiserror`
//!
//! ## Quick Start
//!
//! ```bash
//! export PRACTICUM_TOKEN=... TELEGRAM_TOKEN=... TELEGRAM_CHAT_ID=...
//! homework-bot
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod homework;
pub mod logging;
pub mod notification;
pub mod poller;
