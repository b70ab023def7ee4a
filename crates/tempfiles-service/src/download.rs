//! Download gate: enforces deletion and download limits before serving.

use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info};

use tempfiles_core::error::AppError;
use tempfiles_core::result::AppResult;
use tempfiles_core::traits::{BlobStore, ByteStream};
use tempfiles_core::types::validate_path_segment;
use tempfiles_database::FolderStore;
use tempfiles_entity::folder::FolderRecord;

/// Everything except RFC 3986 unreserved characters is escaped.
const FILENAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A download that has passed the gate and been counted.
#[derive(Debug, Clone)]
pub struct DownloadTicket {
    /// The record after the counter increment.
    pub record: FolderRecord,
    pub filename: String,
    /// Backend locator of the blob.
    pub locator: String,
    /// Value for the `Content-Disposition` header.
    pub content_disposition: String,
}

/// Resolves folder and file to a servable blob, counting the download.
#[derive(Clone)]
pub struct DownloadGate {
    store: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for DownloadGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadGate").finish()
    }
}

impl DownloadGate {
    pub fn new(store: Arc<dyn FolderStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Check policy and commit the download count.
    ///
    /// The increment, and the deletion flag when the limit is reached, are
    /// persisted before this returns, so a transfer that later fails still
    /// counts.
    pub async fn admit(&self, folder_id: &str, filename: &str) -> AppResult<DownloadTicket> {
        validate_path_segment("filename", filename)?;

        let record = self
            .store
            .get_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        if !self.blobs.exists(folder_id, filename).await? {
            return Err(AppError::not_found(format!(
                "File {filename} not found in folder {folder_id}"
            )));
        }

        if record.is_deleted {
            return Err(AppError::gone(format!("Folder {folder_id} has been deleted")));
        }

        // None means a concurrent request deleted the folder first.
        let record = self
            .store
            .record_download(folder_id)
            .await?
            .ok_or_else(|| AppError::gone(format!("Folder {folder_id} has been deleted")))?;

        debug!(
            folder_id,
            filename,
            download_count = record.download_count,
            download_limit = record.download_limit,
            "Download counted"
        );
        if record.is_deleted {
            info!(
                folder_id,
                download_count = record.download_count,
                "Download limit reached, folder queued for purge"
            );
        }

        Ok(DownloadTicket {
            locator: self.blobs.path_for(folder_id, filename)?,
            content_disposition: content_disposition(filename),
            filename: filename.to_string(),
            record,
        })
    }

    /// Open the blob behind an admitted download.
    pub async fn open(&self, ticket: &DownloadTicket) -> AppResult<ByteStream> {
        self.blobs
            .open(&ticket.record.folder_id, &ticket.filename)
            .await
    }
}

/// `attachment; filename=<name>` with the name percent-escaped.
pub fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename={}",
        utf8_percent_encode(filename, FILENAME_ESCAPE)
    )
}
