//! Frame and batch progress display for the command-line tool

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static FRAME_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} frames {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for one or more input files
///
/// A batch bar is added only when more than one file is processed; the frame
/// bar always tracks the file currently rendering.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    frame_bar: Option<ProgressBar>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            frame_bar: None,
            file_count: 0,
        }
    }

    /// Prepare the batch bar for `file_count` inputs
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Number of files announced by [`ProgressManager::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Start a frame bar for a new file
    pub fn start_file(&mut self, path: &Path, frame_count: u32) {
        if let Some(previous) = self.frame_bar.take() {
            previous.finish_and_clear();
        }

        let bar = ProgressBar::new(u64::from(frame_count));
        bar.set_style(FRAME_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        self.frame_bar = Some(self.multi_progress.add(bar));
    }

    /// Report how many frames of the current file are done
    pub fn update_frame(&self, frames_done: u32) {
        if let Some(ref bar) = self.frame_bar {
            bar.set_position(u64::from(frames_done));
        }
    }

    /// Mark the current file as completed
    pub fn complete_file(&mut self, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(bar) = self.frame_bar.take() {
            bar.finish_with_message(format!("✓ {:.1}s", elapsed.as_secs_f64()));
        }
    }

    /// Whether any bar is still on screen
    pub const fn is_active(&self) -> bool {
        self.batch_bar.is_some() || self.frame_bar.is_some()
    }

    /// Remove every bar without marking the batch as done
    pub fn clear(&mut self) {
        if let Some(bar) = self.frame_bar.take() {
            bar.finish_and_clear();
        }
        if let Some(batch_bar) = self.batch_bar.take() {
            batch_bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        if let Some(batch_bar) = self.batch_bar.take() {
            batch_bar.finish_with_message("All files processed");
        }
        if let Some(bar) = self.frame_bar.take() {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
