//! Bottom-up tree renaming.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use reext_core::{RenameConfig, RenameError, RenameTask, SkipReport, WalkWarning};
use reext_scan::TreeWalker;

use crate::conflict::{Conflict, ConflictKind, detect_conflict};
use crate::progress::RenameProgress;
use crate::rename::safe_rename;
use crate::OPERATION_CHANNEL_SIZE;

/// Result of a completed rename walk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenameOutcome {
    /// Renames performed, in the order they happened.
    pub renamed: Vec<RenameTask>,
    /// Files left alone because their destination was taken.
    pub skipped: SkipReport,
    /// Matching files whose name already ended in the new extension.
    pub unchanged: usize,
    /// Entries the walker could not read.
    pub warnings: Vec<WalkWarning>,
    /// Whether the filesystem was left untouched.
    pub dry_run: bool,
    /// Wall time of the walk.
    pub duration: Duration,
}

impl RenameOutcome {
    /// Get a human-readable summary of the walk.
    pub fn summary(&self) -> String {
        let action = if self.dry_run { "Would rename" } else { "Renamed" };
        let mut summary = format!("{} {} files", action, self.renamed.len());
        if !self.skipped.is_empty() {
            summary.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        if !self.warnings.is_empty() {
            summary.push_str(&format!(", {} unreadable", self.warnings.len()));
        }
        summary
    }
}

/// Renames matching files across a directory tree.
///
/// Directories are processed deepest first and files within a directory in
/// name order. Progress is published on a broadcast channel after every
/// matching file.
pub struct TreeRenamer {
    walker: TreeWalker,
    progress_tx: broadcast::Sender<RenameProgress>,
}

impl Default for TreeRenamer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRenamer {
    /// Create a new renamer.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(OPERATION_CHANNEL_SIZE);
        Self {
            walker: TreeWalker::new(),
            progress_tx,
        }
    }

    /// Subscribe to rename progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<RenameProgress> {
        self.progress_tx.subscribe()
    }

    /// Rename every file under `config.root` whose name ends in the old
    /// extension so that it ends in the new one.
    ///
    /// Fails with [`RenameError::NotADirectory`] before any mutation if the
    /// root is not a directory. Any other error aborts the walk; renames
    /// already performed are kept.
    pub fn run(&self, config: &RenameConfig) -> Result<RenameOutcome, RenameError> {
        let start = Instant::now();
        let old = config.old_spec();
        let new = config.new_spec();

        let walk = self.walker.walk(config)?;

        let files_total = walk
            .dirs
            .iter()
            .flat_map(|d| d.files.iter())
            .filter(|name| old.matches(name))
            .count();

        info!(
            root = %config.root.display(),
            old = %old,
            new = %new,
            matches = files_total,
            dry_run = config.dry_run,
            "renaming extensions"
        );

        let mut outcome = RenameOutcome {
            dry_run: config.dry_run,
            warnings: walk.warnings,
            ..RenameOutcome::default()
        };
        let mut progress = RenameProgress::new(files_total);
        let mut simulation = DryRun::default();

        for dir in &walk.dirs {
            for name in &dir.files {
                let Some(new_name) = old.replace_in(name, &new) else {
                    continue;
                };
                let task = RenameTask::new(dir.path.join(name), dir.path.join(new_name));
                progress.set_current_file(Some(task.source.clone()));

                if task.is_noop() {
                    debug!(path = %task.source.display(), "already has the new extension");
                    outcome.unchanged += 1;
                    progress.record_unchanged();
                    self.publish(&progress);
                    continue;
                }

                let conflict = if config.dry_run {
                    simulation.detect_conflict(&task)?
                } else {
                    detect_conflict(&task)?
                };

                if let Some(reason) = conflict.as_ref().and_then(|c| c.kind.skip_reason()) {
                    warn!("Skipping {}: {}", task.source.display(), reason);
                    outcome.skipped.push(task.source, task.destination, reason);
                    progress.record_skipped();
                    self.publish(&progress);
                    continue;
                }

                if config.dry_run {
                    simulation.record(&task);
                } else {
                    safe_rename(&task.source, &task.destination)?;
                }
                info!(
                    from = %task.source.display(),
                    to = %task.destination.display(),
                    "renamed"
                );
                outcome.renamed.push(task);
                progress.record_renamed();
                self.publish(&progress);
            }
        }

        outcome.duration = start.elapsed();
        debug!("{} in {:.2}s", outcome.summary(), outcome.duration.as_secs_f64());
        Ok(outcome)
    }

    fn publish(&self, progress: &RenameProgress) {
        // No subscribers is fine.
        let _ = self.progress_tx.send(progress.clone());
    }
}

/// Filesystem view for dry runs, overlaying renames that were only planned.
#[derive(Debug, Default)]
struct DryRun {
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl DryRun {
    fn detect_conflict(&self, task: &RenameTask) -> Result<Option<Conflict>, RenameError> {
        if self.claimed.contains(&task.destination) {
            return Ok(Some(Conflict::new(
                task.source.clone(),
                task.destination.clone(),
                ConflictKind::TargetExists,
            )));
        }
        if self.vacated.contains(&task.destination) {
            return Ok(None);
        }
        detect_conflict(task)
    }

    fn record(&mut self, task: &RenameTask) {
        self.claimed.remove(&task.source);
        self.vacated.insert(task.source.clone());
        self.vacated.remove(&task.destination);
        self.claimed.insert(task.destination.clone());
    }
}

/// Rename `old_extension` to `new_extension` for every file under `root`.
///
/// Both extensions are normalized first, so `"TXT"`, `".txt"` and `" .TxT "`
/// are equivalent. Returns the files skipped because their new name was
/// already taken.
pub fn rename_tree(
    root: impl AsRef<Path>,
    old_extension: &str,
    new_extension: &str,
) -> Result<SkipReport, RenameError> {
    let config = RenameConfig::new(root.as_ref(), old_extension, new_extension);
    TreeRenamer::new().run(&config).map(|outcome| outcome.skipped)
}
