//! Local filesystem blob store.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use tempfiles_core::config::storage::StorageConfig;
use tempfiles_core::error::{AppError, ErrorKind};
use tempfiles_core::result::AppResult;
use tempfiles_core::traits::blob::{BlobStore, ByteStream};
use tempfiles_core::types::validate_path_segment;

/// Stores each folder as a directory `<root>/<folder_id>/` holding the
/// uploaded files under their original names.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    io_timeout: Duration,
}

impl LocalBlobStore {
    /// Create the store, creating the root directory if it is missing.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        info!(root = %root.display(), "Local blob store ready");

        Ok(Self {
            root,
            io_timeout: Duration::from_secs(config.io_timeout_seconds.max(1)),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn folder_dir(&self, folder_id: &str) -> AppResult<PathBuf> {
        validate_path_segment("folder id", folder_id)?;
        Ok(self.root.join(folder_id))
    }

    fn resolve(&self, folder_id: &str, filename: &str) -> AppResult<PathBuf> {
        validate_path_segment("filename", filename)?;
        Ok(self.folder_dir(folder_id)?.join(filename))
    }

    /// Run one filesystem operation under the configured timeout.
    async fn timed<T>(
        &self,
        what: String,
        op: impl Future<Output = std::io::Result<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.io_timeout, op).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to {what}"),
                e,
            )),
            Err(_) => Err(AppError::storage(format!(
                "Timed out after {}s trying to {what}",
                self.io_timeout.as_secs()
            ))),
        }
    }
}

async fn write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(content).await?;
    file.flush().await
}

async fn is_file(path: &Path) -> std::io::Result<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn backend(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match fs::metadata(&self.root).await {
            Ok(meta) => Ok(meta.is_dir() && !meta.permissions().readonly()),
            Err(_) => Ok(false),
        }
    }

    async fn save(&self, folder_id: &str, filename: &str, content: Bytes) -> AppResult<()> {
        let dir = self.folder_dir(folder_id)?;
        let path = self.resolve(folder_id, filename)?;

        self.timed(
            format!("create folder directory: {folder_id}"),
            fs::create_dir_all(&dir),
        )
        .await?;
        self.timed(
            format!("write file: {folder_id}/{filename}"),
            write_file(&path, &content),
        )
        .await?;

        debug!(folder_id, filename, bytes = content.len(), "Wrote blob");
        Ok(())
    }

    async fn exists(&self, folder_id: &str, filename: &str) -> AppResult<bool> {
        let path = self.resolve(folder_id, filename)?;
        self.timed(format!("stat file: {folder_id}/{filename}"), is_file(&path))
            .await
    }

    async fn folder_exists(&self, folder_id: &str) -> AppResult<bool> {
        let dir = self.folder_dir(folder_id)?;
        self.timed(format!("stat folder: {folder_id}"), fs::try_exists(&dir))
            .await
    }

    fn path_for(&self, folder_id: &str, filename: &str) -> AppResult<String> {
        Ok(self.resolve(folder_id, filename)?.display().to_string())
    }

    async fn open(&self, folder_id: &str, filename: &str) -> AppResult<ByteStream> {
        let path = self.resolve(folder_id, filename)?;
        let file = match tokio::time::timeout(self.io_timeout, fs::File::open(&path)).await {
            Ok(Ok(file)) => file,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::not_found(format!(
                    "File {filename} not found in folder {folder_id}"
                )));
            }
            Ok(Err(e)) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open file: {folder_id}/{filename}"),
                    e,
                ));
            }
            Err(_) => {
                return Err(AppError::storage(format!(
                    "Timed out opening file: {folder_id}/{filename}"
                )));
            }
        };

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn list(&self, folder_id: &str) -> AppResult<Vec<String>> {
        let dir = self.folder_dir(folder_id)?;
        let read = async {
            let mut names = Vec::new();
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
                Err(e) => return Err(e),
            };
            while let Some(entry) = entries.next_entry().await? {
                if entry.file_type().await?.is_file() {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
            names.sort();
            Ok(names)
        };
        self.timed(format!("list folder: {folder_id}"), read).await
    }

    async fn purge(&self, folder_id: &str) -> AppResult<()> {
        let dir = self.folder_dir(folder_id)?;
        let remove = async {
            match fs::remove_dir_all(&dir).await {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            }
        };
        self.timed(format!("purge folder: {folder_id}"), remove)
            .await?;

        debug!(folder_id, "Purged folder");
        Ok(())
    }
}
