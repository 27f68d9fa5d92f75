//! Rename engine for reext.
//!
//! This crate walks a directory tree bottom-up and changes one file
//! extension to another, skipping files whose new name is already taken.
//! Case-only renames go through a temporary name so they take effect on
//! case-insensitive filesystems.
//!
//! The walk is not transactional: if a rename fails, files renamed earlier
//! in the same walk keep their new names.

mod conflict;
mod executor;
mod progress;
mod rename;
mod renamer;

pub use conflict::{Conflict, ConflictKind, detect_conflict};
pub use executor::{RenameTreeResult, start_rename_tree};
pub use progress::RenameProgress;
pub use rename::safe_rename;
pub use renamer::{RenameOutcome, TreeRenamer, rename_tree};

// Re-export core types for convenience
pub use reext_core::{
    ExtensionSpec, RenameConfig, RenameConfigBuilder, RenameError, RenameTask, SkipEntry,
    SkipReason, SkipReport, WalkWarning, WarningKind,
};

/// Default channel buffer size for rename progress updates.
pub const OPERATION_CHANNEL_SIZE: usize = 100;
