//! Partition driver applying generated boxes to a decoded image
//!
//! A [`Partitioner`] is configured once with a tile size and an overlap and
//! then reused across many images. Each call to [`Partitioner::partition`]
//! returns a lazy [`Tiles`] iterator; cropping happens as the caller pulls.

use crate::io::error::Result;
use crate::io::image::load_image;
use crate::log::{Logger, NoOpLogger};
use crate::spatial::boxes::{BoxGenerator, GridShape, HeightCheck, TileRecord};
use crate::spatial::dimensions::{Dimensions, TileBox};
use crate::{log_debug, log_info};
use image::DynamicImage;
use std::borrow::Cow;
use std::fmt;
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::Arc;

/// Immutable tile and overlap sizes shared by every partitioning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionConfig {
    /// Size of a full, untrimmed tile
    pub tile_size: Dimensions,
    /// Pixels shared by neighbouring tiles along each axis
    pub overlap_size: Dimensions,
    /// Image dimension the tile height is validated against
    pub height_check: HeightCheck,
}

impl PartitionConfig {
    /// Create a configuration, defaulting a missing overlap to zero
    pub fn new(tile_size: Dimensions, overlap_size: Option<Dimensions>) -> Self {
        Self {
            tile_size,
            overlap_size: overlap_size.unwrap_or_default(),
            height_check: HeightCheck::default(),
        }
    }

    /// Replace the height validation mode
    #[must_use]
    pub const fn with_height_check(mut self, height_check: HeightCheck) -> Self {
        self.height_check = height_check;
        self
    }
}

/// Where the image to partition comes from
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// An image that is already decoded in memory
    Decoded(&'a DynamicImage),
    /// A file to decode with the `image` crate
    Path(&'a Path),
}

impl<'a> From<&'a DynamicImage> for ImageSource<'a> {
    fn from(image: &'a DynamicImage) -> Self {
        Self::Decoded(image)
    }
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for ImageSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoded(image) => {
                write!(f, "<decoded {}x{} image>", image.width(), image.height())
            }
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One cropped tile with its position in the grid
#[derive(Debug, Clone)]
pub struct Tile {
    /// Cropped pixels
    pub image: DynamicImage,
    /// Region of the source image the tile was cropped from
    pub tile_box: TileBox,
    /// Grid row, counted from the top
    pub row: u32,
    /// Grid column, counted from the left
    pub col: u32,
}

/// Splits images into a grid of optionally overlapping tiles
pub struct Partitioner {
    config: PartitionConfig,
    logger: Arc<dyn Logger>,
}

impl Partitioner {
    /// Create a partitioner that does not log
    pub fn new(tile_size: Dimensions, overlap_size: Option<Dimensions>) -> Self {
        Self::from_config(PartitionConfig::new(tile_size, overlap_size))
    }

    /// Create a partitioner from a full configuration
    pub fn from_config(config: PartitionConfig) -> Self {
        Self {
            config,
            logger: Arc::new(NoOpLogger),
        }
    }

    /// Attach a logger used by this partitioner and every iterator it creates
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        log_debug!(logger, "Initializing logger");
        self.logger = logger;
        self
    }

    /// Size of a full tile
    pub const fn size(&self) -> Dimensions {
        self.config.tile_size
    }

    /// Size of the overlap between neighbouring tiles
    pub const fn overlap(&self) -> Dimensions {
        self.config.overlap_size
    }

    /// Configuration this partitioner was built with
    pub const fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Name of the attached logger, if any
    pub fn log_name(&self) -> Option<&str> {
        self.logger.name()
    }

    /// Generate the boxes for an image of the given size
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFeature` for overhang and `InvalidConfiguration`
    /// if the configured sizes do not suit the image.
    pub fn boxes(&self, image_size: Dimensions, allow_overhang: bool) -> Result<BoxGenerator> {
        BoxGenerator::with_options(
            image_size,
            self.config.tile_size,
            self.config.overlap_size,
            allow_overhang,
            self.config.height_check,
            Arc::clone(&self.logger),
        )
    }

    /// Partition an image into tiles
    ///
    /// A path source is decoded first; a decoded source is borrowed without
    /// copying. Validation runs before the iterator is returned.
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` if a path cannot be decoded, and the
    /// errors of [`Partitioner::boxes`] otherwise.
    pub fn partition<'a>(
        &self,
        source: impl Into<ImageSource<'a>>,
        allow_overhang: bool,
    ) -> Result<Tiles<'a>> {
        let source = source.into();
        let label = source.to_string();
        log_info!(self.logger, "Partitioning '{label}'");

        let image = match source {
            ImageSource::Decoded(image) => Cow::Borrowed(image),
            ImageSource::Path(path) => Cow::Owned(load_image(path, self.logger.as_ref())?),
        };

        let image_size = Dimensions::new(image.width(), image.height());
        let boxes = self.boxes(image_size, allow_overhang)?;

        Ok(Tiles {
            image,
            boxes,
            label,
            produced: 0,
            finished: false,
            logger: Arc::clone(&self.logger),
        })
    }
}

impl fmt::Debug for Partitioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partitioner")
            .field("config", &self.config)
            .field("log_name", &self.log_name())
            .finish()
    }
}

/// Lazy sequence of cropped [`Tile`]s in row-major order
pub struct Tiles<'a> {
    image: Cow<'a, DynamicImage>,
    boxes: BoxGenerator,
    label: String,
    produced: usize,
    finished: bool,
    logger: Arc<dyn Logger>,
}

impl Tiles<'_> {
    /// Grid shape of the whole sequence
    pub const fn shape(&self) -> GridShape {
        self.boxes.shape()
    }

    /// Number of tiles yielded so far
    pub const fn produced(&self) -> usize {
        self.produced
    }

    /// Description of the source image used in log messages
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The decoded source image
    pub fn source_image(&self) -> &DynamicImage {
        &self.image
    }
}

impl Iterator for Tiles<'_> {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(TileRecord { tile_box, row, col }) = self.boxes.next() else {
            if !self.finished {
                self.finished = true;
                log_info!(
                    self.logger,
                    "Sliced and diced '{}' into {} partitions",
                    self.label,
                    self.produced
                );
            }
            return None;
        };

        log_debug!(self.logger, "Cropping row {row} col {col}");
        let image = self.image.crop_imm(
            tile_box.left,
            tile_box.upper,
            tile_box.width(),
            tile_box.height(),
        );
        self.produced += 1;

        Some(Tile {
            image,
            tile_box,
            row,
            col,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.boxes.size_hint()
    }
}

impl ExactSizeIterator for Tiles<'_> {}

impl FusedIterator for Tiles<'_> {}

impl fmt::Debug for Tiles<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tiles")
            .field("label", &self.label)
            .field("boxes", &self.boxes)
            .field("produced", &self.produced)
            .finish_non_exhaustive()
    }
}
