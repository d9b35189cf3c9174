//! Process-wide log sinks.
//!
//! Every event goes to stdout and, without ANSI colours, to an append-only
//! log file. Lines carry the source file and line number of the call site.
//! The file writer is non-blocking; keep the returned [`WorkerGuard`] alive
//! until exit so buffered lines are flushed.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{HomeworkBotError, Result};

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(&config.file)?;
    std::fs::create_dir_all(dir)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_file(true)
        .with_line_number(true);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| HomeworkBotError::Logging(e.to_string()))?;

    Ok(guard)
}

/// Split a log file path into its directory (`.` when bare) and file name.
fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path.file_name().ok_or_else(|| {
        HomeworkBotError::Logging(format!("log path has no file name: {}", path.display()))
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_file_name_goes_to_current_dir() {
        let (dir, name) = split_log_path(Path::new("homework_bot.log")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "homework_bot.log");
    }

    #[test]
    fn nested_path_is_split() {
        let (dir, name) = split_log_path(Path::new("/var/log/bot/out.log")).unwrap();
        assert_eq!(dir, Path::new("/var/log/bot"));
        assert_eq!(name, "out.log");
    }

    #[test]
    fn directory_only_path_is_rejected() {
        let err = split_log_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, HomeworkBotError::Logging(_)));
    }
}
