//! Injectable logging capability
//!
//! Geometry generation and partitioning accept an `Arc<dyn Logger>` instead of
//! reaching for global logging state. `NoOpLogger` is the default everywhere;
//! the binary swaps in `TracingLogger` once a subscriber is installed.

/// Logger trait, levels and formatting macros
pub mod logger;
/// Logger that discards everything
pub mod noop;
/// Adapter forwarding to the `tracing` ecosystem
pub mod tracing_adapter;

pub use logger::{LogLevel, Logger};
pub use noop::NoOpLogger;
pub use tracing_adapter::TracingLogger;
