use std::{env, error::Error};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigPaths, LogLevel};

const LOG_FORMAT_VAR: &str = "PLAYBAR_LOG_FORMAT";
const DAYS_TO_KEEP: usize = 7;

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()))
}

fn json_requested() -> bool {
    env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json")
}

/// Initialize console tracing.
///
/// Uses `RUST_LOG` if set, otherwise `default_level`. Output is pretty
/// unless `PLAYBAR_LOG_FORMAT=json`. Logs go to stderr so they never mix
/// with the transport lines on stdout.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(default_level: LogLevel) -> Result<(), Box<dyn Error>> {
    let registry = tracing_subscriber::registry().with(env_filter(default_level));

    if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Initialize tracing to stderr and a daily rolling log file.
///
/// The file lives in [`ConfigPaths::log_dir`]. The returned guard flushes
/// the file writer when dropped and must be held for the life of the
/// program.
///
/// # Errors
/// Returns error if the log directory or file cannot be created, or a
/// global subscriber is already installed
pub fn init_with_file(default_level: LogLevel) -> Result<WorkerGuard, Box<dyn Error>> {
    let log_dir = ConfigPaths::log_dir()?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("playbar")
        .filename_suffix("log")
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter(default_level));

    if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(guard)
}
