//! Tile geometry
//!
//! This module contains the pure geometry side of partitioning:
//! - Pixel dimensions and bounding boxes
//! - Input validation against image size
//! - Lazy row-major box generation with boundary trimming

/// Sliding-window box generation and validation
pub mod boxes;
/// Pixel dimensions and bounding boxes
pub mod dimensions;

pub use boxes::{BoxGenerator, GridShape, HeightCheck, TileRecord, generate_boxes};
pub use dimensions::{Dimensions, TileBox};
