//! Command-line interface for batch partitioning of image files

use crate::io::configuration::DEFAULT_OVERLAP;
use crate::io::error::{PartitionError, Result, invalid_arguments};
use crate::io::image::{save_tile, tile_output_path};
use crate::io::logging::LogConfig;
use crate::io::progress::ProgressManager;
use crate::log::{Logger, NoOpLogger};
use crate::partition::{PartitionConfig, Partitioner};
use crate::spatial::{Dimensions, HeightCheck};
use crate::{log_error, log_info};
use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "tilesplit")]
#[command(
    author,
    version,
    about = "Partition images into a grid of optionally overlapping tiles"
)]
/// Command-line arguments for the partitioning tool
// Each flag is an independent user preference
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tile width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Tile height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Horizontal overlap between neighbouring tiles in pixels
    #[arg(long, default_value_t = DEFAULT_OVERLAP)]
    pub owidth: u32,

    /// Vertical overlap between neighbouring tiles in pixels
    #[arg(long, default_value_t = DEFAULT_OVERLAP)]
    pub oheight: u32,

    /// Log to stderr and to <NAME>.log
    #[arg(long, value_name = "NAME")]
    pub log: Option<String>,

    /// Continue with the remaining images when one fails
    #[arg(short, long)]
    pub keep_going: bool,

    /// Suppress progress output (implied by --log)
    #[arg(short, long)]
    pub quiet: bool,

    /// Validate tile height against image width, as older releases did
    #[arg(long)]
    pub legacy_height_check: bool,

    /// Input images followed by the output directory
    #[arg(value_name = "PATHS", num_args = 2.., required = true)]
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// Requested tile size
    pub const fn tile_size(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Requested overlap size
    pub const fn overlap_size(&self) -> Dimensions {
        Dimensions::new(self.owidth, self.oheight)
    }

    /// Partitioner configuration derived from the flags
    pub fn partition_config(&self) -> PartitionConfig {
        let height_check = if self.legacy_height_check {
            HeightCheck::AgainstImageWidth
        } else {
            HeightCheck::AgainstImageHeight
        };
        PartitionConfig::new(self.tile_size(), Some(self.overlap_size()))
            .with_height_check(height_check)
    }

    /// Logging configuration derived from `--log`
    pub fn log_config(&self) -> LogConfig {
        LogConfig::from(self.log.clone())
    }

    /// Split the positional paths into inputs and the output directory
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` unless there is at least one input and an
    /// output directory.
    pub fn inputs_and_output(&self) -> Result<(&[PathBuf], &Path)> {
        match self.paths.split_last() {
            Some((output_dir, inputs)) if !inputs.is_empty() => {
                Ok((inputs, output_dir.as_path()))
            }
            _ => Err(invalid_arguments(
                &"expected one or more input images followed by an output directory",
            )),
        }
    }

    /// Check if progress should be displayed
    ///
    /// Log lines share stderr with the bars, so logging turns progress off.
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && self.log.is_none()
    }
}

/// Outcome of a successful batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images partitioned completely
    pub images: usize,
    /// Tiles written across all images
    pub tiles: usize,
}

/// Orchestrates partitioning of every input image into the output directory
pub struct FileProcessor {
    cli: Cli,
    partitioner: Partitioner,
    logger: Arc<dyn Logger>,
    progress_manager: Option<ProgressManager>,
    // Tile path -> input it was written from
    written_tiles: HashMap<PathBuf, PathBuf>,
}

impl FileProcessor {
    /// Create a file processor that does not log
    pub fn new(cli: Cli) -> Self {
        Self::with_logger(cli, Arc::new(NoOpLogger))
    }

    /// Create a file processor logging through `logger`
    pub fn with_logger(cli: Cli, logger: Arc<dyn Logger>) -> Self {
        let partitioner =
            Partitioner::from_config(cli.partition_config()).with_logger(Arc::clone(&logger));
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            partitioner,
            logger,
            progress_manager,
            written_tiles: HashMap::new(),
        }
    }

    /// The partitioner shared by every image of the batch
    pub const fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    /// Partition every input image
    ///
    /// Without `--keep-going` the first failing image aborts the batch. With
    /// it, failures are logged and reported together at the end.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` for missing paths or when two inputs would
    /// write the same tile file, `FileSystem` if the output directory cannot
    /// be created, the first per-image error, or `BatchFailed` when images
    /// failed under `--keep-going`.
    pub fn process(&mut self) -> Result<BatchSummary> {
        let (inputs, output_dir) = self.cli.inputs_and_output()?;
        let inputs = inputs.to_vec();
        let output_dir = output_dir.to_path_buf();
        self.written_tiles.clear();

        std::fs::create_dir_all(&output_dir).map_err(|source| PartitionError::FileSystem {
            path: output_dir.clone(),
            operation: "create output directory",
            source,
        })?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(inputs.len());
        }

        let mut summary = BatchSummary::default();
        let mut failed = 0;

        for (index, input) in inputs.iter().enumerate() {
            match self.process_file(input, &output_dir, index) {
                Ok(tiles) => {
                    summary.images += 1;
                    summary.tiles += tiles;
                }
                Err(err) if self.cli.keep_going => {
                    log_error!(self.logger, "Skipping '{}': {err}", input.display());
                    failed += 1;
                }
                Err(err) => {
                    if let Some(ref pm) = self.progress_manager {
                        pm.finish();
                    }
                    return Err(err);
                }
            }

            if let Some(ref pm) = self.progress_manager {
                pm.complete_file();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if failed > 0 {
            return Err(PartitionError::BatchFailed {
                failed,
                total: inputs.len(),
            });
        }

        log_info!(
            self.logger,
            "Wrote {} tiles from {} images to '{}'",
            summary.tiles,
            summary.images,
            output_dir.display()
        );

        Ok(summary)
    }

    fn process_file(&mut self, input: &Path, output_dir: &Path, index: usize) -> Result<usize> {
        let mut tiles = self.partitioner.partition(input, false)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input, tiles.len());
        }

        let mut written = 0;
        for tile in &mut tiles {
            let tile_path = tile_output_path(output_dir, input, tile.row, tile.col);
            if let Some(owner) = self.written_tiles.get(&tile_path) {
                return Err(invalid_arguments(&format!(
                    "'{}' and '{}' both map to tile '{}'",
                    owner.display(),
                    input.display(),
                    tile_path.display()
                )));
            }

            save_tile(&tile.image, &tile_path)?;
            self.written_tiles.insert(tile_path, input.to_path_buf());
            written += 1;

            if let Some(ref pm) = self.progress_manager {
                pm.update_tiles(written);
            }
        }

        Ok(written)
    }
}
