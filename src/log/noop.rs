//! No-operation logger

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// A logger that discards all messages
///
/// Default logger of the partitioner, the box generator and the tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
