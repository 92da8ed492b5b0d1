//! Applying generated boxes to decoded images

/// Partitioner configuration and the lazy tile iterator
pub mod partitioner;

pub use partitioner::{ImageSource, PartitionConfig, Partitioner, Tile, Tiles};
