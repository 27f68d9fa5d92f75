//! Bottom-up directory walking for reext.
//!
//! This crate enumerates the files under a root directory and hands them to
//! the rename engine grouped by directory, deepest directories first.
//!
//! # Example
//!
//! ```rust,no_run
//! use reext_scan::{RenameConfig, TreeWalker};
//!
//! let config = RenameConfig::new("/path/to/dir", "old", "new");
//! let walk = TreeWalker::new().walk(&config).unwrap();
//!
//! for dir in &walk.dirs {
//!     println!("{}: {} files", dir.path.display(), dir.files.len());
//! }
//! ```

mod walker;

pub use walker::{DirEntries, TreeWalk, TreeWalker};

// Re-export core types for convenience
pub use reext_core::{RenameConfig, RenameError, WalkWarning, WarningKind};
