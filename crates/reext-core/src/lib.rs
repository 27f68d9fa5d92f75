//! Core types for reext.
//!
//! This crate provides the data structures shared by the walker and the
//! rename engine: normalized extensions, rename tasks, skip reports,
//! configuration and error types.

mod config;
mod error;
mod ext;
mod report;
mod task;

pub use config::{RenameConfig, RenameConfigBuilder};
pub use error::{RenameError, WalkWarning, WarningKind};
pub use ext::ExtensionSpec;
pub use report::{SkipEntry, SkipReason, SkipReport};
pub use task::{RenameTask, paths_eq_ignore_case};
