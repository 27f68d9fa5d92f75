//! Destination conflict detection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use reext_core::{RenameError, RenameTask, SkipReason, paths_eq_ignore_case};

/// An entry found at a rename destination.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// The source path being renamed.
    pub source: PathBuf,
    /// The destination path where the entry exists.
    pub destination: PathBuf,
    /// The kind of conflict.
    pub kind: ConflictKind,
}

impl Conflict {
    /// Create a new conflict.
    pub fn new(source: PathBuf, destination: PathBuf, kind: ConflictKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }
}

/// The kind of conflict encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// A distinct entry already exists at the destination.
    TargetExists,
    /// The destination resolves to the source itself (case-insensitive storage).
    SameFile,
}

impl ConflictKind {
    /// The skip reason to report, if this conflict blocks the rename.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::TargetExists => Some(SkipReason::TargetExists),
            Self::SameFile => None,
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetExists => write!(f, "target exists"),
            Self::SameFile => write!(f, "Source and destination are the same file"),
        }
    }
}

/// Check what, if anything, occupies the destination of `task`.
///
/// An existing entry only counts as the source itself when the two paths
/// match case-insensitively and refer to the same file. On a case-sensitive
/// filesystem holding both `x.OLD` and `x.old`, renaming the former onto the
/// latter is a true collision.
pub fn detect_conflict(task: &RenameTask) -> Result<Option<Conflict>, RenameError> {
    let existing = match fs::symlink_metadata(&task.destination) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(RenameError::io(&task.destination, e)),
    };

    let kind = if paths_eq_ignore_case(&task.source, &task.destination)
        && is_same_file(&task.source, &existing)?
    {
        ConflictKind::SameFile
    } else {
        ConflictKind::TargetExists
    };

    Ok(Some(Conflict::new(
        task.source.clone(),
        task.destination.clone(),
        kind,
    )))
}

#[cfg(unix)]
fn is_same_file(source: &Path, existing: &fs::Metadata) -> Result<bool, RenameError> {
    use std::os::unix::fs::MetadataExt;

    let meta = fs::symlink_metadata(source).map_err(|e| RenameError::io(source, e))?;
    Ok(meta.dev() == existing.dev() && meta.ino() == existing.ino())
}

#[cfg(not(unix))]
fn is_same_file(source: &Path, _existing: &fs::Metadata) -> Result<bool, RenameError> {
    // Names matched case-insensitively; the default storage here is case-insensitive.
    fs::symlink_metadata(source).map_err(|e| RenameError::io(source, e))?;
    Ok(true)
}
