//! Skip reporting for non-fatal per-file outcomes.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Why a matching file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A distinct entry already occupies the destination.
    TargetExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetExists => write!(f, "target exists"),
        }
    }
}

/// A file that was skipped during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipEntry {
    /// The file that was not renamed.
    pub source: PathBuf,
    /// Where it would have been renamed to.
    pub destination: PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl fmt::Display for SkipEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipping {}: {}", self.source.display(), self.reason)
    }
}

/// Ordered list of skipped files from a single walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkipReport {
    entries: Vec<SkipEntry>,
}

impl SkipReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped file.
    pub fn push(&mut self, source: PathBuf, destination: PathBuf, reason: SkipReason) {
        self.entries.push(SkipEntry {
            source,
            destination,
            reason,
        });
    }

    /// Number of skipped files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was skipped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over skipped files in the order they were encountered.
    pub fn iter(&self) -> std::slice::Iter<'_, SkipEntry> {
        self.entries.iter()
    }

    /// The skipped entries.
    pub fn entries(&self) -> &[SkipEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a SkipReport {
    type Item = &'a SkipEntry;
    type IntoIter = std::slice::Iter<'a, SkipEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for SkipReport {
    type Item = SkipEntry;
    type IntoIter = std::vec::IntoIter<SkipEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
