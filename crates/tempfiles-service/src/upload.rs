//! Upload coordinator: deduplicates by content and creates folders.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use tempfiles_auth::password::PasswordHasher;
use tempfiles_core::config::upload::UploadConfig;
use tempfiles_core::error::{AppError, ErrorKind};
use tempfiles_core::result::AppResult;
use tempfiles_core::traits::BlobStore;
use tempfiles_core::types::{UploadFile, UploadOptions, validate_path_segment};
use tempfiles_database::FolderStore;
use tempfiles_entity::folder::{CreateFolderRecord, FolderRecord};

use crate::identity::FolderIdentity;

/// Whether an upload created a folder or matched an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Created,
    AlreadyExists,
}

/// Result of an upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub record: FolderRecord,
    pub status: UploadStatus,
    pub message: String,
}

/// Validates uploads, deduplicates them by content identity, and persists
/// blobs and the folder record.
#[derive(Clone)]
pub struct UploadCoordinator {
    store: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
    hasher: Arc<PasswordHasher>,
    config: UploadConfig,
    /// Serializes concurrent uploads that resolve to the same folder id.
    in_flight: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for UploadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCoordinator")
            .field("store", &self.store.backend())
            .field("blobs", &self.blobs.backend())
            .finish()
    }
}

impl UploadCoordinator {
    pub fn new(
        store: Arc<dyn FolderStore>,
        blobs: Arc<dyn BlobStore>,
        hasher: Arc<PasswordHasher>,
        config: UploadConfig,
    ) -> Self {
        Self {
            store,
            blobs,
            hasher,
            config,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Configured defaults for options the client leaves out.
    pub fn defaults(&self) -> &UploadConfig {
        &self.config
    }

    /// Store an upload, or return the existing folder for identical content.
    pub async fn upload(
        &self,
        files: Vec<UploadFile>,
        options: UploadOptions,
    ) -> AppResult<UploadOutcome> {
        self.validate_files(&files)?;
        let identity = FolderIdentity::derive(&files)?;

        let slot = InFlightSlot::acquire(&self.in_flight, &identity.folder_id);
        let _guard = slot.lock.lock().await;
        self.upload_locked(&identity, files, options).await
    }

    async fn upload_locked(
        &self,
        identity: &FolderIdentity,
        files: Vec<UploadFile>,
        options: UploadOptions,
    ) -> AppResult<UploadOutcome> {
        if let Some(existing) = self.store.get_by_hash(&identity.folder_hash).await? {
            if existing.is_deleted {
                return Err(AppError::conflict(format!(
                    "Folder {} is pending purge, retry later",
                    existing.folder_id
                )));
            }
            info!(folder_id = %existing.folder_id, "Upload matched existing folder");
            return Ok(UploadOutcome {
                message: format!("File {} already exists", identity.folder_hash),
                record: existing,
                status: UploadStatus::AlreadyExists,
            });
        }

        if self.store.get_by_id(&identity.folder_id).await?.is_some()
            || self.blobs.folder_exists(&identity.folder_id).await?
        {
            warn!(folder_id = %identity.folder_id, "Folder id collision");
            return Err(AppError::conflict(format!(
                "Folder id {} is already taken",
                identity.folder_id
            )));
        }

        let password_hash = match options.password.as_deref() {
            Some(password) => Some(self.hasher.hash_password(password)?),
            None => None,
        };

        self.blobs
            .save_all(&identity.folder_id, &files)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Storage => e,
                _ => AppError::with_source(ErrorKind::Storage, "Failed to store upload", e),
            })?;

        let now = Utc::now();
        let expire_time = match expiry_after(now, options.ttl_minutes) {
            Ok(expire_time) => expire_time,
            Err(err) => {
                self.rollback_blobs(&identity.folder_id).await;
                return Err(err);
            }
        };
        let data = CreateFolderRecord {
            folder_id: identity.folder_id.clone(),
            folder_hash: identity.folder_hash.clone(),
            file_count: files.len() as i32,
            is_hidden: options.hidden,
            password_hash,
            upload_date: now,
            expire_time,
            download_limit: options.download_limit,
        };

        let record = match self.store.insert(data).await {
            Ok(record) => record,
            Err(err) => {
                self.rollback_blobs(&identity.folder_id).await;
                return Err(err);
            }
        };

        info!(
            folder_id = %record.folder_id,
            file_count = record.file_count,
            download_limit = record.download_limit,
            expire_time = %record.expire_time,
            encrypted = record.is_encrypted,
            "Folder created"
        );

        Ok(UploadOutcome {
            message: format!("File {} uploaded successfully", identity.folder_hash),
            record,
            status: UploadStatus::Created,
        })
    }

    async fn rollback_blobs(&self, folder_id: &str) {
        if let Err(err) = self.blobs.purge(folder_id).await {
            warn!(
                folder_id = %folder_id,
                error = %err,
                "Failed to roll back blobs after aborted upload"
            );
        }
    }

    fn validate_files(&self, files: &[UploadFile]) -> AppResult<()> {
        if files.is_empty() {
            return Err(AppError::validation(
                "No files were provided in the 'file' field",
            ));
        }
        if files.len() > self.config.max_files {
            return Err(AppError::validation(format!(
                "Too many files: {} (max {})",
                files.len(),
                self.config.max_files
            )));
        }

        let mut seen = HashSet::with_capacity(files.len());
        for file in files {
            validate_path_segment("filename", &file.name)?;
            if !seen.insert(file.name.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate filename in upload: {}",
                    file.name
                )));
            }
        }
        Ok(())
    }
}

/// `now + ttl_minutes`, rejecting lifetimes chrono cannot represent.
fn expiry_after(now: DateTime<Utc>, ttl_minutes: i64) -> AppResult<DateTime<Utc>> {
    Duration::try_minutes(ttl_minutes)
        .filter(|ttl| *ttl > Duration::zero())
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::validation(format!("Invalid time limit: {ttl_minutes} minutes")))
}

/// Per-folder-id upload lock; the map entry is released on drop, including
/// when the upload future is cancelled.
struct InFlightSlot<'a> {
    map: &'a DashMap<String, Arc<Mutex<()>>>,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> InFlightSlot<'a> {
    fn acquire(map: &'a DashMap<String, Arc<Mutex<()>>>, key: &'a str) -> Self {
        let lock = map.entry(key.to_string()).or_default().clone();
        Self { map, key, lock }
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        // The map's own reference plus ours.
        self.map
            .remove_if(self.key, |_, l| Arc::ptr_eq(l, &self.lock) && Arc::strong_count(l) == 2);
    }
}
