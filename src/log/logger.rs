//! Logger trait definition

use std::fmt::Arguments;

/// Severity of a log message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Verbose tracing information
    Trace,
    /// Per-box and per-crop diagnostics
    Debug,
    /// Progress of a partitioning run
    Info,
    /// Recoverable problems
    Warn,
    /// Validation and decoding failures
    Error,
}

/// Logging interface for partitioning components
///
/// Implementations must be `Send + Sync` so a single logger can be shared
/// between the partitioner and every iterator it hands out.
pub trait Logger: Send + Sync {
    /// Log a message at the given level
    ///
    /// The convenience methods below all delegate here.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Identifier of this logger, if it has one
    fn name(&self) -> Option<&str> {
        None
    }

    /// Log a trace-level message
    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    /// Log a debug-level message
    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Log an info-level message
    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Log a warning
    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    /// Log an error
    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// Log a formatted trace-level message through a [`Logger`]
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(format_args!($($arg)*))
    };
}

/// Log a formatted debug-level message through a [`Logger`]
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

/// Log a formatted info-level message through a [`Logger`]
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

/// Log a formatted warning through a [`Logger`]
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

/// Log a formatted error through a [`Logger`]
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}
