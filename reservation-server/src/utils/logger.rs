//! Logging Infrastructure
//!
//! Structured logging setup: `EnvFilter` (`RUST_LOG` overrides `LOG_LEVEL`),
//! optional JSON lines, optional daily-rolling file under the log directory.

use std::path::Path;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

const LOG_FILE_PREFIX: &str = "reservation-server";

/// Initialize the logger with optional file output
///
/// Falls back to stdout when `log_dir` does not exist.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&Path>,
) -> Result<(), BoxError> {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_appender = log_dir
        .filter(|dir| dir.exists())
        .map(|dir| tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));

    match (json, file_appender) {
        (true, Some(appender)) => subscriber.json().with_writer(appender).try_init(),
        (true, None) => subscriber.json().try_init(),
        (false, Some(appender)) => subscriber.with_writer(appender).try_init(),
        (false, None) => subscriber.try_init(),
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},tower_http=info")))
}
