//! JWalk-based directory walker with children-before-parent ordering.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::PathBuf;

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, warn};

use reext_core::{RenameConfig, RenameError, WalkWarning, WarningKind};

/// The non-directory entries found directly inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntries {
    /// Directory path.
    pub path: PathBuf,
    /// Depth below the walk root (root = 0).
    pub depth: u32,
    /// File names, sorted.
    pub files: Vec<String>,
}

/// Result of walking a tree.
#[derive(Debug, Clone, Default)]
pub struct TreeWalk {
    /// Directories ordered so that every directory comes after all of its
    /// descendants.
    pub dirs: Vec<DirEntries>,
    /// Entries that could not be read.
    pub warnings: Vec<WalkWarning>,
}

impl TreeWalk {
    /// Total number of files across all directories.
    pub fn file_count(&self) -> usize {
        self.dirs.iter().map(|d| d.files.len()).sum()
    }
}

/// Walks a directory tree and groups its files by directory, bottom-up.
///
/// Traversal is serial; the walker never follows symbolic links into other
/// directories. Unreadable directories are recorded as warnings and skipped.
#[derive(Debug, Default)]
pub struct TreeWalker;

impl TreeWalker {
    /// Create a new walker.
    pub fn new() -> Self {
        Self
    }

    /// Walk the tree rooted at `config.root`.
    ///
    /// `config.max_depth` limits how many directory levels below the root are
    /// entered: `Some(0)` lists only the root's own files.
    pub fn walk(&self, config: &RenameConfig) -> Result<TreeWalk, RenameError> {
        // Collecting components drops trailing separators and `.` segments.
        let root: PathBuf = config.root.components().collect();
        if !root.is_dir() {
            return Err(RenameError::NotADirectory {
                path: config.root.clone(),
            });
        }

        let max_depth = config
            .max_depth
            .map(|d| d as usize + 1)
            .unwrap_or(usize::MAX);

        let walker = WalkDir::new(&root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(!config.include_hidden)
            .follow_links(false)
            .min_depth(0)
            .max_depth(max_depth);

        let mut dirs: Vec<DirEntries> = Vec::new();
        let mut files_by_parent: HashMap<PathBuf, Vec<String>> = HashMap::new();
        let mut warnings = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    warn!(path = %path.display(), "{err}");
                    warnings.push(WalkWarning::new(path, err.to_string(), WarningKind::ReadError));
                    continue;
                }
            };

            let path = entry.path();
            let file_type = entry.file_type();

            // The root may itself be a symlink to a directory.
            if file_type.is_dir() || entry.depth() == 0 {
                dirs.push(DirEntries {
                    path,
                    depth: entry.depth() as u32,
                    files: Vec::new(),
                });
                continue;
            }

            // Symlinks to directories are left alone like directories.
            if file_type.is_symlink() && path.is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                let warning = WalkWarning::invalid_name(&path);
                warn!("{}", warning.message);
                warnings.push(warning);
                continue;
            };

            files_by_parent
                .entry(entry.parent_path().to_path_buf())
                .or_default()
                .push(name.to_owned());
        }

        for dir in &mut dirs {
            if let Some(mut files) = files_by_parent.remove(&dir.path) {
                files.sort();
                dir.files = files;
            }
        }

        for (parent, files) in files_by_parent {
            let warning = WalkWarning::new(
                &parent,
                format!("{} files found under an unlisted directory", files.len()),
                WarningKind::UnlistedParent,
            );
            warn!(path = %parent.display(), "{}", warning.message);
            warnings.push(warning);
        }

        // Stable sort keeps sibling order from the sorted walk.
        dirs.sort_by_key(|d| Reverse(d.depth));

        let walk = TreeWalk { dirs, warnings };
        debug!(
            root = %root.display(),
            dirs = walk.dirs.len(),
            files = walk.file_count(),
            "walk complete"
        );
        Ok(walk)
    }
}
