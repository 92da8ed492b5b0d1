//! Optional dual-sink logging for the command-line tool
//!
//! When enabled, messages at INFO and above go to standard error and
//! everything from DEBUG up is appended to `<log_name>.log`.

use crate::io::configuration::{LOG_DIRECTORY, LOG_FILE_EXTENSION};
use crate::io::error::{PartitionError, Result};
use crate::log::{Logger, NoOpLogger, TracingLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Whether and where to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Install the logging backend at all
    pub enable_logging: bool,
    /// Logger name, also the stem of the log file
    pub log_name: String,
    /// Directory holding the log file
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// Logging switched off
    pub fn disabled() -> Self {
        Self {
            enable_logging: false,
            log_name: String::new(),
            log_dir: PathBuf::from(LOG_DIRECTORY),
        }
    }

    /// Logging switched on under the given name
    pub fn named(log_name: impl Into<String>) -> Self {
        Self {
            enable_logging: true,
            log_name: log_name.into(),
            log_dir: PathBuf::from(LOG_DIRECTORY),
        }
    }

    /// Place the log file in another directory
    #[must_use]
    pub fn in_directory(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Path of the log file
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("{}.{LOG_FILE_EXTENSION}", self.log_name))
    }

    /// Logger matching this configuration
    ///
    /// A disabled configuration yields a [`NoOpLogger`].
    pub fn logger(&self) -> Arc<dyn Logger> {
        if self.enable_logging {
            Arc::new(TracingLogger::new(self.log_name.clone()))
        } else {
            Arc::new(NoOpLogger)
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl From<Option<String>> for LogConfig {
    fn from(log_name: Option<String>) -> Self {
        log_name.map_or_else(Self::disabled, Self::named)
    }
}

/// Keeps the background log file writer alive
///
/// Dropping the guard flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Install the global logging subscriber
///
/// Returns `None` without touching global state when logging is disabled.
///
/// # Errors
///
/// Returns `InvalidArguments` for an empty log name, `FileSystem` if the log
/// file cannot be opened, and `Logging` if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<Option<LoggingGuard>> {
    if !config.enable_logging {
        return Ok(None);
    }

    if config.log_name.is_empty() {
        return Err(crate::io::error::invalid_arguments(
            &"log name must not be empty",
        ));
    }

    let log_path = config.log_file_path();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|source| PartitionError::FileSystem {
            path: log_path.clone(),
            operation: "open log file",
            source,
        })?;
    let (file_writer, file_guard) = tracing_appender::non_blocking(log_file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| PartitionError::Logging {
            reason: e.to_string(),
        })?;

    Ok(Some(LoggingGuard {
        _file_guard: file_guard,
    }))
}
