//! Expiry sweeper: soft-deletes expired folders and purges deleted ones.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use tempfiles_core::result::AppResult;
use tempfiles_core::traits::BlobStore;
use tempfiles_database::FolderStore;
use tempfiles_entity::folder::{FolderFilter, FolderPatch};

/// Outcome of one sweep phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub scanned: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs the two sweep phases against the record store and blob store.
///
/// Per-folder failures are logged and skipped; only a failed scan fails a
/// phase.
#[derive(Clone)]
pub struct ExpirySweeper {
    store: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
    soft_delete_running: Arc<Mutex<()>>,
    purge_running: Arc<Mutex<()>>,
}

impl std::fmt::Debug for ExpirySweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirySweeper").finish()
    }
}

impl ExpirySweeper {
    pub fn new(store: Arc<dyn FolderStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            blobs,
            soft_delete_running: Arc::new(Mutex::new(())),
            purge_running: Arc::new(Mutex::new(())),
        }
    }

    /// Flag every live folder whose expiry is before `now` as deleted.
    ///
    /// Returns `None` if a previous run of this phase is still in progress.
    pub async fn soft_delete_expired(&self, now: DateTime<Utc>) -> AppResult<Option<SweepSummary>> {
        let Ok(_running) = self.soft_delete_running.try_lock() else {
            tracing::debug!("Soft-delete sweep still running, skipping tick");
            return Ok(None);
        };

        let expired = self.store.find_where(FolderFilter::ExpiredBefore(now)).await?;
        let mut summary = SweepSummary {
            scanned: expired.len(),
            ..SweepSummary::default()
        };

        for record in &expired {
            match self
                .store
                .update_fields(&record.folder_id, &FolderPatch::soft_delete())
                .await
            {
                Ok(_) => {
                    summary.succeeded += 1;
                    tracing::debug!(
                        folder_id = %record.folder_id,
                        expire_time = %record.expire_time,
                        "Expired folder marked deleted"
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(
                        folder_id = %record.folder_id,
                        error = %e,
                        "Failed to mark expired folder deleted"
                    );
                }
            }
        }

        if summary.scanned > 0 {
            tracing::info!(
                scanned = summary.scanned,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Soft-delete sweep finished"
            );
        }
        Ok(Some(summary))
    }

    /// Remove the blobs and then the record of every deleted folder.
    ///
    /// The record is removed even when removing its blobs fails.
    /// Returns `None` if a previous run of this phase is still in progress.
    pub async fn purge_deleted(&self) -> AppResult<Option<SweepSummary>> {
        let Ok(_running) = self.purge_running.try_lock() else {
            tracing::debug!("Purge sweep still running, skipping tick");
            return Ok(None);
        };

        let deleted = self.store.find_where(FolderFilter::Deleted).await?;
        let mut summary = SweepSummary {
            scanned: deleted.len(),
            ..SweepSummary::default()
        };

        for record in &deleted {
            if let Err(e) = self.blobs.purge(&record.folder_id).await {
                tracing::warn!(
                    folder_id = %record.folder_id,
                    error = %e,
                    "Failed to purge folder blobs"
                );
            }

            match self.store.delete(record.id).await {
                Ok(_) => {
                    summary.succeeded += 1;
                    tracing::debug!(folder_id = %record.folder_id, "Folder purged");
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(
                        folder_id = %record.folder_id,
                        error = %e,
                        "Failed to delete folder record"
                    );
                }
            }
        }

        if summary.scanned > 0 {
            tracing::info!(
                scanned = summary.scanned,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Purge sweep finished"
            );
        }
        Ok(Some(summary))
    }
}
