//! Constants and runtime configuration defaults

/// Overlap used when none is given on the command line
pub const DEFAULT_OVERLAP: u32 = 0;

// Tile naming: <stem>_r<row>c<col><.ext>
/// Marker placed between the source stem and the row index
pub const TILE_ROW_MARKER: &str = "_r";
/// Marker placed between the row index and the column index
pub const TILE_COLUMN_MARKER: &str = "c";

// Logging
/// Extension appended to the log name to form the log file
pub const LOG_FILE_EXTENSION: &str = "log";
/// Directory the log file is written to
pub const LOG_DIRECTORY: &str = ".";

// Progress bar display settings
/// Width of the tile progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Minimum tile count before a per-file tile bar is shown
pub const MIN_TILES_FOR_PROGRESS: usize = 2;
