//! Blob store trait for pluggable file storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;
use crate::types::upload::UploadFile;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Persists uploaded bytes grouped by folder id.
///
/// Layout is one directory-like namespace per folder id holding the files
/// under their original names. The local filesystem implementation lives
/// in `tempfiles-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., "local").
    fn backend(&self) -> &str;

    /// Check whether the backend root is reachable and writable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write a single file into a folder, creating the folder if needed.
    async fn save(&self, folder_id: &str, filename: &str, content: Bytes) -> AppResult<()>;

    /// Check whether a file exists in a folder.
    async fn exists(&self, folder_id: &str, filename: &str) -> AppResult<bool>;

    /// Check whether anything occupies the folder id.
    async fn folder_exists(&self, folder_id: &str) -> AppResult<bool>;

    /// Resolve the backend locator for a file without touching it.
    fn path_for(&self, folder_id: &str, filename: &str) -> AppResult<String>;

    /// Open a file for streaming.
    async fn open(&self, folder_id: &str, filename: &str) -> AppResult<ByteStream>;

    /// List the file names stored in a folder. An absent folder lists empty.
    async fn list(&self, folder_id: &str) -> AppResult<Vec<String>>;

    /// Remove a folder and everything in it. Purging an absent folder is not
    /// an error.
    async fn purge(&self, folder_id: &str) -> AppResult<()>;

    /// Write a batch of files into a fresh folder.
    ///
    /// If any write fails, the folder is purged before the error is returned
    /// so no partial folder is left behind.
    async fn save_all(&self, folder_id: &str, files: &[UploadFile]) -> AppResult<()> {
        for file in files {
            if let Err(err) = self.save(folder_id, &file.name, file.content.clone()).await {
                if let Err(rollback_err) = self.purge(folder_id).await {
                    tracing::error!(
                        folder_id = %folder_id,
                        error = %rollback_err,
                        "Failed to roll back partially written folder"
                    );
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
