//! Error types for tile geometry, image partitioning and batch processing

use std::fmt;
use std::path::PathBuf;

/// Main error type for all partitioning operations
#[derive(Debug)]
pub enum PartitionError {
    /// Tile or overlap size is not usable for the image
    ///
    /// Raised before any box is generated, so no partial output exists.
    InvalidConfiguration {
        /// Name of the offending size component (e.g. `"tile width"`)
        parameter: &'static str,
        /// Provided value
        value: u32,
        /// Bound the value was checked against
        limit: u32,
        /// Which constraint was violated
        reason: &'static str,
    },

    /// A requested mode exists in the interface but is not implemented
    UnsupportedFeature {
        /// Name of the requested feature
        feature: &'static str,
    },

    /// The source image could not be opened or decoded
    SourceUnavailable {
        /// Path of the source image
        path: PathBuf,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Failed to encode or write a tile to disk
    TileExport {
        /// Path where the tile was to be written
        path: PathBuf,
        /// Underlying encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Command-line arguments are structurally wrong
    InvalidArguments {
        /// What is wrong with the arguments
        reason: String,
    },

    /// The logging backend could not be installed
    Logging {
        /// Description of the failure
        reason: String,
    },

    /// Some images of a batch failed while processing continued
    BatchFailed {
        /// Number of images that failed
        failed: usize,
        /// Number of images in the batch
        total: usize,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration {
                parameter,
                value,
                limit,
                reason,
            } => {
                write!(f, "Invalid {parameter} {value}: {reason} ({limit})")
            }
            Self::UnsupportedFeature { feature } => {
                write!(f, "Unsupported feature: {feature} is not implemented")
            }
            Self::SourceUnavailable { path, source } => {
                write!(f, "Could not open '{}': {source}", path.display())
            }
            Self::TileExport { path, source } => {
                write!(f, "Failed to write tile '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidArguments { reason } => {
                write!(f, "Invalid arguments: {reason}")
            }
            Self::Logging { reason } => {
                write!(f, "Failed to initialize logging: {reason}")
            }
            Self::BatchFailed { failed, total } => {
                write!(f, "{failed} of {total} images could not be partitioned")
            }
        }
    }
}

impl std::error::Error for PartitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } | Self::TileExport { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for partitioning results
pub type Result<T> = std::result::Result<T, PartitionError>;

impl From<image::ImageError> for PartitionError {
    fn from(err: image::ImageError) -> Self {
        Self::SourceUnavailable {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PartitionError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid configuration error
pub const fn invalid_configuration(
    parameter: &'static str,
    value: u32,
    limit: u32,
    reason: &'static str,
) -> PartitionError {
    PartitionError::InvalidConfiguration {
        parameter,
        value,
        limit,
        reason,
    }
}

/// Create an invalid arguments error
pub fn invalid_arguments(reason: &impl ToString) -> PartitionError {
    PartitionError::InvalidArguments {
        reason: reason.to_string(),
    }
}
