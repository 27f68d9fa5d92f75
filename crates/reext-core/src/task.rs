//! Rename tasks.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single source to destination rename within one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTask {
    /// Current path of the file.
    pub source: PathBuf,
    /// Path the file is renamed to.
    pub destination: PathBuf,
}

impl RenameTask {
    /// Create a new rename task.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Source and destination are identical; renaming would change nothing.
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }

    /// Source and destination differ only by letter case.
    pub fn is_case_only(&self) -> bool {
        !self.is_noop() && paths_eq_ignore_case(&self.source, &self.destination)
    }
}

/// Compare two paths ignoring letter case.
pub fn paths_eq_ignore_case(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}
