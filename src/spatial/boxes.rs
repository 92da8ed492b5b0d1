//! Sliding-window box generation
//!
//! Boxes are produced lazily in row-major order. Each step translates the
//! window by the tile size minus the overlap; boxes reaching past the right or
//! lower image edge are trimmed for output only, so trimming never changes the
//! step size of later boxes.

use crate::io::error::{PartitionError, Result, invalid_configuration};
use crate::log::{Logger, NoOpLogger};
use crate::spatial::dimensions::{Dimensions, TileBox};
use crate::{log_debug, log_error};
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Which image dimension the tile height is validated against
///
/// Older releases of this tool compared the tile height against the image
/// width. That check is still available for reproducing their output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeightCheck {
    /// Tile height must not exceed the image height
    #[default]
    AgainstImageHeight,
    /// Tile height must not exceed the image width (legacy behaviour)
    AgainstImageWidth,
}

impl HeightCheck {
    const fn limit(self, image_size: Dimensions) -> u32 {
        match self {
            Self::AgainstImageHeight => image_size.height,
            Self::AgainstImageWidth => image_size.width,
        }
    }

    const fn reason(self) -> &'static str {
        match self {
            Self::AgainstImageHeight => "must not exceed image height",
            Self::AgainstImageWidth => "must not exceed image width",
        }
    }
}

/// A generated box with its zero-based grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRecord {
    /// Trimmed region of the image
    pub tile_box: TileBox,
    /// Grid row, counted from the top
    pub row: u32,
    /// Grid column, counted from the left
    pub col: u32,
}

/// Number of rows and columns a partitioning yields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of tile rows
    pub rows: u32,
    /// Number of tile columns
    pub cols: u32,
}

impl GridShape {
    /// Grid shape for an image walked with the given translation offsets
    ///
    /// Offsets must be positive; a zero offset yields an empty grid.
    pub const fn from_offsets(image_size: Dimensions, offsets: Dimensions) -> Self {
        if offsets.width == 0 || offsets.height == 0 {
            return Self { rows: 0, cols: 0 };
        }
        Self {
            rows: image_size.height.div_ceil(offsets.height),
            cols: image_size.width.div_ceil(offsets.width),
        }
    }

    /// Total number of tiles
    pub const fn tile_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows x {} cols", self.rows, self.cols)
    }
}

/// Check that a single tile fits inside the image
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the tile is empty in either dimension,
/// wider than the image, or taller than the dimension selected by
/// `height_check`.
pub fn validate_tile_size(
    image_size: Dimensions,
    tile_size: Dimensions,
    height_check: HeightCheck,
    logger: &dyn Logger,
) -> Result<()> {
    log_debug!(logger, "Validating box size against image size");

    for (parameter, value) in [("tile width", tile_size.width), ("tile height", tile_size.height)] {
        if value == 0 {
            let err = invalid_configuration(parameter, value, 1, "must be at least one pixel");
            log_error!(logger, "{err}");
            return Err(err);
        }
    }

    if tile_size.width > image_size.width {
        let err = invalid_configuration(
            "tile width",
            tile_size.width,
            image_size.width,
            "must not exceed image width",
        );
        log_error!(logger, "{err}");
        return Err(err);
    }

    let height_limit = height_check.limit(image_size);
    if tile_size.height > height_limit {
        let err = invalid_configuration(
            "tile height",
            tile_size.height,
            height_limit,
            height_check.reason(),
        );
        log_error!(logger, "{err}");
        return Err(err);
    }

    Ok(())
}

/// Check that the overlap leaves a positive translation offset on both axes
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the overlap is not strictly smaller than
/// the tile in either dimension.
pub fn validate_overlap_size(
    tile_size: Dimensions,
    overlap_size: Dimensions,
    logger: &dyn Logger,
) -> Result<()> {
    log_debug!(logger, "Validating overlap size against box size");

    if overlap_size.width >= tile_size.width {
        let err = invalid_configuration(
            "overlap width",
            overlap_size.width,
            tile_size.width,
            "must be smaller than tile width",
        );
        log_error!(logger, "{err}");
        return Err(err);
    }

    if overlap_size.height >= tile_size.height {
        let err = invalid_configuration(
            "overlap height",
            overlap_size.height,
            tile_size.height,
            "must be smaller than tile height",
        );
        log_error!(logger, "{err}");
        return Err(err);
    }

    Ok(())
}

/// Generate the boxes covering an image, without logging
///
/// Shorthand for [`BoxGenerator::with_options`] using the corrected height
/// check and a [`NoOpLogger`].
///
/// # Errors
///
/// Returns `UnsupportedFeature` if `allow_overhang` is set, and
/// `InvalidConfiguration` if the sizes fail validation.
pub fn generate_boxes(
    image_size: Dimensions,
    tile_size: Dimensions,
    overlap_size: Dimensions,
    allow_overhang: bool,
) -> Result<BoxGenerator> {
    BoxGenerator::with_options(
        image_size,
        tile_size,
        overlap_size,
        allow_overhang,
        HeightCheck::default(),
        Arc::new(NoOpLogger),
    )
}

/// Lazy row-major sequence of [`TileRecord`]s covering an image
///
/// Holds no state shared with other generators; building a new one from the
/// same inputs reproduces the same sequence.
pub struct BoxGenerator {
    image_size: Dimensions,
    tile_size: Dimensions,
    offsets: Dimensions,
    shape: GridShape,
    left: u32,
    upper: u32,
    row: u32,
    col: u32,
    emitted: usize,
    logger: Arc<dyn Logger>,
}

impl BoxGenerator {
    /// Validate the inputs and prepare the first box
    ///
    /// All validation happens here, before any box is produced.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFeature` if `allow_overhang` is set, and
    /// `InvalidConfiguration` if the tile does not fit the image or the
    /// overlap is not smaller than the tile.
    pub fn with_options(
        image_size: Dimensions,
        tile_size: Dimensions,
        overlap_size: Dimensions,
        allow_overhang: bool,
        height_check: HeightCheck,
        logger: Arc<dyn Logger>,
    ) -> Result<Self> {
        log_debug!(logger, "Generating boxes");

        if allow_overhang {
            let err = PartitionError::UnsupportedFeature {
                feature: "overhanging tiles",
            };
            log_error!(logger, "{err}");
            return Err(err);
        }

        validate_tile_size(image_size, tile_size, height_check, logger.as_ref())?;
        validate_overlap_size(tile_size, overlap_size, logger.as_ref())?;

        // Validation guarantees both offsets are at least one pixel
        let offsets = Dimensions::new(
            tile_size.width - overlap_size.width,
            tile_size.height - overlap_size.height,
        );

        Ok(Self {
            image_size,
            tile_size,
            offsets,
            shape: GridShape::from_offsets(image_size, offsets),
            left: 0,
            upper: 0,
            row: 0,
            col: 0,
            emitted: 0,
            logger,
        })
    }

    /// Rows and columns this generator yields in total
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Translation step between consecutive box origins
    pub const fn offsets(&self) -> Dimensions {
        self.offsets
    }

    /// Size of the image being covered
    pub const fn image_size(&self) -> Dimensions {
        self.image_size
    }
}

impl Iterator for BoxGenerator {
    type Item = TileRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.upper >= self.image_size.height {
            return None;
        }

        if self.left >= self.image_size.width {
            self.left = 0;
            self.col = 0;
            self.row += 1;
            self.upper = self.upper.saturating_add(self.offsets.height);
            if self.upper >= self.image_size.height {
                return None;
            }
        }

        let (row, col) = (self.row, self.col);

        let mut right = self.left.saturating_add(self.tile_size.width);
        if right > self.image_size.width {
            log_debug!(
                self.logger,
                "box (r{row}c{col}) exceeds image width, trimming"
            );
            right = self.image_size.width;
        }

        let mut lower = self.upper.saturating_add(self.tile_size.height);
        if lower > self.image_size.height {
            log_debug!(
                self.logger,
                "box (r{row}c{col}) exceeds image height, trimming"
            );
            lower = self.image_size.height;
        }

        let tile_box = TileBox::new(self.left, self.upper, right, lower);
        debug_assert!(tile_box.fits_within(self.image_size));
        log_debug!(
            self.logger,
            "Box at row {row} column {col} is {tile_box}"
        );

        self.left = self.left.saturating_add(self.offsets.width);
        self.col += 1;
        self.emitted += 1;

        Some(TileRecord { tile_box, row, col })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.tile_count().saturating_sub(self.emitted);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoxGenerator {}

impl FusedIterator for BoxGenerator {}

impl fmt::Debug for BoxGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxGenerator")
            .field("image_size", &self.image_size)
            .field("tile_size", &self.tile_size)
            .field("offsets", &self.offsets)
            .field("shape", &self.shape)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}
