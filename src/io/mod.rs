//! Input/output operations and error handling

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error type shared by the whole crate
pub mod error;
/// Image decoding, tile naming and tile encoding
pub mod image;
/// Optional stderr and file logging setup
pub mod logging;
/// Terminal progress display
pub mod progress;
