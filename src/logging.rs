//! Log setup.
//!
//! The focus screen owns the terminal, so logs go to a daily-rolling file in
//! `~/.studybuddy/logs/`. `RUST_LOG` overrides the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, Paths};
use crate::error::StudyError;

/// Log file name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "studybuddy.log";

/// Build the filter: `RUST_LOG` when set and valid, otherwise `level`.
#[must_use]
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns the writer guard when logging to a file; keep it alive until exit
/// or buffered lines are lost. With file logging off, logs go to stderr only
/// when `RUST_LOG` is set.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(config: &LoggingConfig, paths: &Paths) -> Result<Option<WorkerGuard>, StudyError> {
    if !config.file {
        if std::env::var_os("RUST_LOG").is_none() {
            return Ok(None);
        }
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(&config.level))
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| StudyError::Config(format!("Failed to initialise logging: {e}")))?;
        return Ok(None);
    }

    paths.ensure_dirs()?;
    let appender = tracing_appender::rolling::daily(&paths.logs, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| StudyError::Config(format!("Failed to initialise logging: {e}")))?;

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_used_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter("debug").to_string(), "debug");
    }

    #[test]
    fn test_disabled_file_logging_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("data"));
        let config = LoggingConfig {
            level: "debug".to_string(),
            file: false,
        };

        assert!(init(&config, &paths).unwrap().is_none());
        assert!(!paths.logs.exists());
    }
}
