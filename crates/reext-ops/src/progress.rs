//! Progress reporting for rename walks.

use std::path::PathBuf;

/// Progress information for an ongoing rename walk.
#[derive(Debug, Clone, Default)]
pub struct RenameProgress {
    /// Number of matching files handled so far.
    pub files_processed: usize,
    /// Total number of matching files.
    pub files_total: usize,
    /// Files renamed (or, in a dry run, that would be renamed).
    pub renamed: usize,
    /// Files skipped because their destination is taken.
    pub skipped: usize,
    /// The file currently being processed.
    pub current_file: Option<PathBuf>,
}

impl RenameProgress {
    /// Create a new progress tracker.
    pub fn new(files_total: usize) -> Self {
        Self {
            files_total,
            ..Self::default()
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.files_total > 0 {
            (self.files_processed as f64 / self.files_total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Update the current file being processed.
    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.current_file = path;
    }

    /// Record a completed rename.
    pub fn record_renamed(&mut self) {
        self.files_processed += 1;
        self.renamed += 1;
    }

    /// Record a skipped file.
    pub fn record_skipped(&mut self) {
        self.files_processed += 1;
        self.skipped += 1;
    }

    /// Record a file whose name was already correct.
    pub fn record_unchanged(&mut self) {
        self.files_processed += 1;
    }
}
