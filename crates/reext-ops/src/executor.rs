//! Channel-based front-end for running a rename walk off the caller's thread.

use tokio::sync::{broadcast, mpsc};

use reext_core::{RenameConfig, RenameError};

use crate::progress::RenameProgress;
use crate::renamer::{RenameOutcome, TreeRenamer};
use crate::OPERATION_CHANNEL_SIZE;

/// Result sent through the channel during a rename walk.
#[derive(Debug)]
pub enum RenameTreeResult {
    /// Progress update.
    Progress(RenameProgress),
    /// The walk finished, successfully or not.
    Complete(Result<RenameOutcome, RenameError>),
}

/// Start a rename walk on a blocking task.
///
/// Progress updates arrive first; the last message is always `Complete`.
/// Must be called from within a tokio runtime.
pub fn start_rename_tree(config: RenameConfig) -> mpsc::Receiver<RenameTreeResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        rename_tree_impl(config, tx).await;
    });

    rx
}

/// Internal implementation of the channel front-end.
async fn rename_tree_impl(config: RenameConfig, tx: mpsc::Sender<RenameTreeResult>) {
    let renamer = TreeRenamer::new();
    let mut progress_rx = renamer.subscribe();

    let progress_tx = tx.clone();
    let forwarder = tokio::spawn(async move {
        loop {
            match progress_rx.recv().await {
                Ok(progress) => {
                    if progress_tx
                        .send(RenameTreeResult::Progress(progress))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // The renamer moves into the task and is dropped when it ends, which
    // closes the progress channel and lets the forwarder drain and stop.
    let result = tokio::task::spawn_blocking(move || renamer.run(&config))
        .await
        .unwrap_or_else(|e| {
            Err(RenameError::TaskFailed {
                message: e.to_string(),
            })
        });

    let _ = forwarder.await;
    let _ = tx.send(RenameTreeResult::Complete(result)).await;
}
