//! The rename primitive.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use reext_core::{RenameError, RenameTask};

/// Rename `source` to `destination` in place.
///
/// When the two paths differ only by letter case, the file is first moved to
/// a randomly named sibling and then to `destination`, since a direct rename
/// is a no-op on many case-insensitive filesystems. If that second step
/// fails the file stays under the temporary name and
/// [`RenameError::TemporaryOrphan`] reports where it is.
pub fn safe_rename(source: &Path, destination: &Path) -> Result<(), RenameError> {
    let task = RenameTask::new(source, destination);
    if !task.is_case_only() {
        return fs::rename(source, destination).map_err(|e| RenameError::Rename {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        });
    }

    let temp = temp_sibling(source);
    debug!(
        from = %source.display(),
        temp = %temp.display(),
        "case-only rename via temporary name"
    );

    fs::rename(source, &temp).map_err(|e| RenameError::Rename {
        from: source.to_path_buf(),
        to: temp.clone(),
        source: e,
    })?;

    fs::rename(&temp, destination).map_err(|e| RenameError::TemporaryOrphan {
        from: source.to_path_buf(),
        temp,
        to: destination.to_path_buf(),
        source: e,
    })
}

/// A path next to `path` whose name is a fresh v4 UUID.
fn temp_sibling(path: &Path) -> PathBuf {
    let dir = path.parent().unwrap_or(Path::new(""));
    loop {
        let candidate = dir.join(Uuid::new_v4().to_string());
        if fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }
    }
}
