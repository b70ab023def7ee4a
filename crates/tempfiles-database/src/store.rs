//! Folder record store capability.

use async_trait::async_trait;
use uuid::Uuid;

use tempfiles_core::result::AppResult;
use tempfiles_entity::folder::{CreateFolderRecord, FolderFilter, FolderPatch, FolderRecord};

/// Durable folder records, the single source of truth for folder lifecycle.
///
/// `folder_id` arguments are the short public identifiers; `id` is the
/// store-assigned primary key.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store name (e.g., "postgres", "memory").
    fn backend(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    async fn get_by_id(&self, folder_id: &str) -> AppResult<Option<FolderRecord>>;

    async fn get_by_hash(&self, folder_hash: &str) -> AppResult<Option<FolderRecord>>;

    async fn exists_by_hash(&self, folder_hash: &str) -> AppResult<bool>;

    /// Insert a new record. A duplicate `folder_id` or `folder_hash` fails
    /// with a conflict.
    async fn insert(&self, data: CreateFolderRecord) -> AppResult<FolderRecord>;

    /// Apply a partial update. Returns `None` when the folder does not exist.
    async fn update_fields(
        &self,
        folder_id: &str,
        patch: &FolderPatch,
    ) -> AppResult<Option<FolderRecord>>;

    /// Count one download and flag the folder deleted once its limit is
    /// reached, as one atomic step.
    ///
    /// Returns the updated record, or `None` if the folder is absent or
    /// already deleted.
    async fn record_download(&self, folder_id: &str) -> AppResult<Option<FolderRecord>>;

    async fn find_where(&self, filter: FolderFilter) -> AppResult<Vec<FolderRecord>>;

    /// Delete a record by primary key. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
