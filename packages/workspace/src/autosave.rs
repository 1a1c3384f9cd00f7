//! Debounced background saving
//!
//! ```text
//! edit ─► schedule(snapshot) ─► [channel] ─► worker ── delay elapsed ──► store.save
//!                                              ▲  ├─ newer snapshot: re-arm timer
//!                                              │  └─ other project: write pending first
//! status ◄──────────── watch ◄─────────────────┘
//! ```
//!
//! Editing never waits on the store. Only the newest snapshot inside a quiet
//! period is written, per project, and a failed write is reported once and
//! not retried. Writes run on the blocking pool.

use crate::store::ProjectStore;
use pagecraft_model::ProjectDocument;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Quiet period before a scheduled snapshot is written
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Pending,
    Saved,
    Failed(String),
}

impl SaveStatus {
    /// Status line shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Idle => "",
            SaveStatus::Pending => "Saving...",
            SaveStatus::Saved => "All changes saved",
            SaveStatus::Failed(_) => "Save failed",
        }
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug)]
pub enum AutosaveError {
    #[error("Autosave worker has stopped")]
    Closed,

    #[error("Autosave worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug)]
struct PendingSave {
    project_id: String,
    name: String,
    document: ProjectDocument,
}

/// Handle to the background save task
///
/// Must be created inside a tokio runtime.
pub struct Autosaver {
    sender: mpsc::UnboundedSender<PendingSave>,
    status_tx: Arc<watch::Sender<SaveStatus>>,
    status_rx: watch::Receiver<SaveStatus>,
    worker: JoinHandle<()>,
}

impl Autosaver {
    pub fn spawn(store: Arc<dyn ProjectStore>, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);
        let status_tx = Arc::new(status_tx);

        let worker = tokio::spawn(run_worker(store, delay, receiver, status_tx.clone()));

        Self {
            sender,
            status_tx,
            status_rx,
            worker,
        }
    }

    /// Queue a snapshot for saving; returns immediately
    pub fn schedule(
        &self,
        project_id: &str,
        name: &str,
        document: ProjectDocument,
    ) -> Result<(), AutosaveError> {
        if self.sender.is_closed() {
            return Err(AutosaveError::Closed);
        }
        self.status_tx.send_replace(SaveStatus::Pending);
        self.sender
            .send(PendingSave {
                project_id: project_id.to_string(),
                name: name.to_string(),
                document,
            })
            .map_err(|_| AutosaveError::Closed)
    }

    pub fn status(&self) -> SaveStatus {
        self.status_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.status_rx.clone()
    }

    /// Write any pending snapshot now and stop the worker
    pub async fn shutdown(self) -> Result<SaveStatus, AutosaveError> {
        let Self {
            sender,
            status_rx,
            worker,
            ..
        } = self;
        drop(sender);
        worker.await?;
        let status = status_rx.borrow().clone();
        Ok(status)
    }
}

async fn run_worker(
    store: Arc<dyn ProjectStore>,
    delay: Duration,
    mut receiver: mpsc::UnboundedReceiver<PendingSave>,
    status: Arc<watch::Sender<SaveStatus>>,
) {
    let mut pending: Option<PendingSave> = None;

    loop {
        let Some(current) = pending.take() else {
            match receiver.recv().await {
                Some(next) => {
                    pending = Some(next);
                    continue;
                }
                None => break,
            }
        };

        tokio::select! {
            next = receiver.recv() => match next {
                Some(next) => {
                    // A snapshot of another project never replaces this one
                    if next.project_id != current.project_id
                        && write(&store, &status, current).await
                    {
                        status.send_replace(SaveStatus::Pending);
                    }
                    pending = Some(next);
                }
                None => {
                    write(&store, &status, current).await;
                    break;
                }
            },
            _ = tokio::time::sleep(delay) => {
                write(&store, &status, current).await;
            }
        }
    }

    tracing::debug!("autosave worker stopped");
}

async fn write(
    store: &Arc<dyn ProjectStore>,
    status: &watch::Sender<SaveStatus>,
    save: PendingSave,
) -> bool {
    let project_id = save.project_id.clone();
    let store = store.clone();
    let result = tokio::task::spawn_blocking(move || {
        store.save(&save.project_id, &save.name, &save.document)
    })
    .await;

    match result {
        Ok(Ok(())) => {
            tracing::info!(project = %project_id, "project saved");
            status.send_replace(SaveStatus::Saved);
            true
        }
        Ok(Err(err)) => {
            tracing::warn!(project = %project_id, error = %err, "autosave failed");
            status.send_replace(SaveStatus::Failed(err.to_string()));
            false
        }
        Err(err) => {
            tracing::warn!(project = %project_id, error = %err, "autosave task failed");
            status.send_replace(SaveStatus::Failed(err.to_string()));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(SaveStatus::Pending.to_string(), "Saving...");
        assert_eq!(SaveStatus::Saved.to_string(), "All changes saved");
        assert_eq!(
            SaveStatus::Failed("disk full".to_string()).to_string(),
            "Save failed"
        );
    }
}
