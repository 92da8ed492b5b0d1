//! Pixel dimensions and bounding boxes in image coordinate space
//!
//! Coordinates follow the usual raster convention: the origin is the top-left
//! corner, `right` and `lower` are exclusive.

use std::fmt;

/// Width and height in pixels
///
/// Used for image size, tile size and overlap size alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Horizontal extent in pixels
    pub width: u32,
    /// Vertical extent in pixels
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions from a width and a height
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-sized dimensions, the default overlap
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rectangular region `(left, upper, right, lower)` of an image
///
/// Boxes produced by the geometry generator always satisfy
/// `left < right` and `upper < lower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileBox {
    /// Left edge, inclusive
    pub left: u32,
    /// Upper edge, inclusive
    pub upper: u32,
    /// Right edge, exclusive
    pub right: u32,
    /// Lower edge, exclusive
    pub lower: u32,
}

impl TileBox {
    /// Create a box from its four edges
    pub const fn new(left: u32, upper: u32, right: u32, lower: u32) -> Self {
        Self {
            left,
            upper,
            right,
            lower,
        }
    }

    /// Horizontal extent of the box
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent of the box
    pub const fn height(&self) -> u32 {
        self.lower.saturating_sub(self.upper)
    }

    /// Size of the box as dimensions
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// Whether the box is non-empty and lies inside an image of the given size
    pub const fn fits_within(&self, image_size: Dimensions) -> bool {
        self.left < self.right
            && self.upper < self.lower
            && self.right <= image_size.width
            && self.lower <= image_size.height
    }
}

impl From<(u32, u32, u32, u32)> for TileBox {
    fn from((left, upper, right, lower): (u32, u32, u32, u32)) -> Self {
        Self::new(left, upper, right, lower)
    }
}

impl fmt::Display for TileBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.upper, self.right, self.lower
        )
    }
}
