//! Logging setup — daily log files plus optional console output.
//!
//! Files are named `ac_controller.YYYY-MM-DD.log`. The appender rolls over at
//! midnight and removes the oldest files beyond `max_log_files`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::LoggingConfig;

pub const LOG_FILE_PREFIX: &str = "ac_controller";
pub const LOG_FILE_SUFFIX: &str = "log";

/// Logging setup failures.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log directory")]
    Directory(#[from] std::io::Error),
    #[error("failed to open log file")]
    Appender(#[from] InitError),
    #[error("a global subscriber is already installed")]
    Subscriber(#[from] TryInitError),
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered file output when dropped, so `main`
/// keeps it alive until the process exits.
///
/// # Errors
///
/// Returns a [`LoggingError`] if the log directory or file cannot be created
/// or a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let filter =
        EnvFilter::try_new(config.filter_directive()).unwrap_or_else(|_| EnvFilter::new("info"));

    std::fs::create_dir_all(&config.directory)?;
    let appender = file_appender(config)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);
    let console_layer = config
        .keep_console_output
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    tracing::info!(
        directory = %config.directory.display(),
        level = %config.level,
        console = config.keep_console_output,
        max_log_files = config.max_log_files,
        "logging initialized"
    );
    Ok(guard)
}

fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender, InitError> {
    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX);
    if config.max_log_files > 0 {
        builder = builder.max_log_files(config.max_log_files);
    }
    builder.build(&config.directory)
}
