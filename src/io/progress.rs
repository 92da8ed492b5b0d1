//! Batch progress display with a per-file tile bar

use crate::io::configuration::{MIN_TILES_FOR_PROGRESS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for a batch of images
///
/// A files bar is shown when more than one image is processed; each image
/// large enough to be worth it gets a tile bar that is reused between files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    tile_bar: Option<ProgressBar>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} tiles"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Files: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            tile_bar: None,
            file_count: 0,
        }
    }

    /// Prepare bars for a batch of `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Reset the tile bar for a new image
    pub fn start_file(&mut self, index: usize, path: &Path, tile_count: usize) {
        if tile_count < MIN_TILES_FOR_PROGRESS {
            if let Some(ref bar) = self.tile_bar {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_prefix(String::new());
            }
            return;
        }

        let display_name = path.file_name().unwrap_or_default().to_string_lossy();
        let prefix = format!("[{}/{}] {display_name}", index + 1, self.file_count);

        let bar = self.tile_bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(0);
            bar.set_style(TILE_STYLE.clone());
            self.multi_progress.add(bar)
        });
        bar.set_length(tile_count as u64);
        bar.set_position(0);
        bar.set_prefix(prefix);
    }

    /// Report how many tiles of the current image have been written
    pub fn update_tiles(&self, written: usize) {
        if let Some(ref bar) = self.tile_bar {
            bar.set_position(written as u64);
        }
    }

    /// Mark the current image as done
    pub fn complete_file(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        if let Some(ref tile_bar) = self.tile_bar {
            tile_bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
