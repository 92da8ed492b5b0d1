//! Partition raster images into a grid of rectangular, optionally overlapping tiles
//!
//! The geometry generator walks a tile-sized window across the image in
//! row-major order, trimming boxes at the right and lower edges. The partition
//! driver crops each box out of a decoded image and hands back the tiles with
//! their row and column in the grid.

#![forbid(unsafe_code)]

/// Input/output operations, command-line surface and error handling
pub mod io;
/// Injectable logging capability
pub mod log;
/// Applying generated boxes to decoded images
pub mod partition;
/// Tile geometry and box generation
pub mod spatial;

pub use io::error::{PartitionError, Result};
pub use partition::{ImageSource, PartitionConfig, Partitioner, Tile, Tiles};
pub use spatial::{Dimensions, TileBox, generate_boxes};
