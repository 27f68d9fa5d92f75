//! Error types for rename operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a rename walk.
///
/// A walk is not transactional: when one of these is returned, files renamed
/// before the failure keep their new names.
#[derive(Debug, Error)]
pub enum RenameError {
    /// Root path is not an existing directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// A rename step failed.
    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The second step of a case-only rename failed, leaving the file under
    /// its temporary name.
    #[error(
        "Failed to rename {temp} to {to}: {source}; the file formerly at {from} \
         must be recovered manually from {temp}"
    )]
    TemporaryOrphan {
        from: PathBuf,
        temp: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background rename task did not finish.
    #[error("Rename task failed: {message}")]
    TaskFailed { message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl RenameError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Whether a file may have been left under a generated temporary name.
    pub fn is_orphan(&self) -> bool {
        matches!(self, Self::TemporaryOrphan { .. })
    }
}

/// Kind of walk warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Error reading a directory.
    ReadError,
    /// File name is not valid UTF-8 and cannot be matched.
    InvalidName,
    /// Files were found under a directory the walk did not record.
    UnlistedParent,
}

/// Non-fatal warning encountered while walking the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl WalkWarning {
    /// Create a new walk warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for a name that could not be decoded.
    pub fn invalid_name(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Skipping non UTF-8 file name: {}", path.display()),
            path,
            kind: WarningKind::InvalidName,
        }
    }
}
