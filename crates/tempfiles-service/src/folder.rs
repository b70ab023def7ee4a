//! Folder listing, lookup, and explicit deletion.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use tempfiles_core::error::AppError;
use tempfiles_core::result::AppResult;
use tempfiles_core::traits::BlobStore;
use tempfiles_database::FolderStore;
use tempfiles_entity::folder::{FolderFilter, FolderPatch, FolderRecord};

/// A folder record with the names of its stored files.
#[derive(Debug, Clone, Serialize)]
pub struct FolderDetail {
    #[serde(flatten)]
    pub record: FolderRecord,
    pub files: Vec<String>,
}

/// Read-mostly operations over folders outside the upload/download path.
#[derive(Clone)]
pub struct FolderService {
    store: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish()
    }
}

impl FolderService {
    pub fn new(store: Arc<dyn FolderStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Folders that are neither hidden nor deleted, newest first.
    pub async fn list_visible(&self) -> AppResult<Vec<FolderRecord>> {
        self.store.find_where(FolderFilter::Listed).await
    }

    /// Look up a live folder. Used by the HTTP layer before the access gate.
    pub async fn find(&self, folder_id: &str) -> AppResult<Option<FolderRecord>> {
        self.store.get_by_id(folder_id).await
    }

    pub async fn get(&self, folder_id: &str) -> AppResult<FolderDetail> {
        let record = self
            .store
            .get_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        if record.is_deleted {
            return Err(AppError::gone(format!("Folder {folder_id} has been deleted")));
        }

        let files = self.blobs.list(folder_id).await?;
        Ok(FolderDetail { record, files })
    }

    /// Soft-delete a folder; the sweeper purges it later.
    pub async fn delete(&self, folder_id: &str) -> AppResult<FolderRecord> {
        let record = self
            .store
            .get_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        if record.is_deleted {
            return Err(AppError::gone(format!(
                "Folder {folder_id} is already deleted"
            )));
        }

        let record = self
            .store
            .update_fields(folder_id, &FolderPatch::soft_delete())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        info!(folder_id, "Folder deleted on request, queued for purge");
        Ok(record)
    }
}
