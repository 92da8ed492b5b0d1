//! Adapter from [`Logger`] to the `tracing` crate

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger that forwards every message to `tracing`
///
/// The logger name is attached as a structured `logger` field so that
/// messages from several partitioners can be told apart in one log file.
/// Nothing is printed unless a subscriber has been installed, see
/// [`crate::io::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingLogger {
    name: String,
}

impl TracingLogger {
    /// Create a tracing logger with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(logger = %self.name, "{}", args),
            LogLevel::Debug => tracing::debug!(logger = %self.name, "{}", args),
            LogLevel::Info => tracing::info!(logger = %self.name, "{}", args),
            LogLevel::Warn => tracing::warn!(logger = %self.name, "{}", args),
            LogLevel::Error => tracing::error!(logger = %self.name, "{}", args),
        }
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
