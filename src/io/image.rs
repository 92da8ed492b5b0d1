//! Image decoding, tile naming and tile encoding
//!
//! Format handling is delegated to the `image` crate; the output format of a
//! tile follows the extension of its source file.

use crate::io::configuration::{TILE_COLUMN_MARKER, TILE_ROW_MARKER};
use crate::io::error::{PartitionError, Result};
use crate::log::Logger;
use crate::log_error;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Decode an image file
///
/// # Errors
///
/// Returns `SourceUnavailable` carrying the decoder error if the file is
/// missing, unreadable or not a supported image.
pub fn load_image(path: &Path, logger: &dyn Logger) -> Result<DynamicImage> {
    image::open(path).map_err(|source| {
        log_error!(logger, "Could not open {}: {source}", path.display());
        PartitionError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// File name of the tile at `(row, col)` cut from `input_path`
///
/// The name is `<stem>_r<row>c<col><.ext>`, where the extension keeps its
/// leading dot and is omitted when the input has none.
pub fn tile_file_name(input_path: &Path, row: u32, col: u32) -> String {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    format!(
        "{}{TILE_ROW_MARKER}{row}{TILE_COLUMN_MARKER}{col}{extension}",
        stem.to_string_lossy()
    )
}

/// Full output path of the tile at `(row, col)` inside `output_dir`
pub fn tile_output_path(output_dir: &Path, input_path: &Path, row: u32, col: u32) -> PathBuf {
    output_dir.join(tile_file_name(input_path, row, col))
}

/// Encode a tile, inferring the format from the path extension
///
/// # Errors
///
/// Returns `TileExport` if the format is unknown or the file cannot be
/// written.
pub fn save_tile(tile: &DynamicImage, path: &Path) -> Result<()> {
    tile.save(path).map_err(|source| PartitionError::TileExport {
        path: path.to_path_buf(),
        source,
    })
}
