//! Folder record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One upload: a content-addressed group of files and its lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    /// Store-assigned primary key.
    pub id: Uuid,
    /// Short public identifier used in URLs.
    pub folder_id: String,
    /// Content-derived identifier used for deduplication.
    pub folder_hash: String,
    /// Number of files in the upload.
    pub file_count: i32,
    /// Excluded from the public listing.
    pub is_hidden: bool,
    /// Downloads require a token issued against `password_hash`.
    pub is_encrypted: bool,
    /// Argon2 hash of the folder password.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub upload_date: DateTime<Utc>,
    /// After this instant the sweeper soft-deletes the folder.
    pub expire_time: DateTime<Utc>,
    /// `0` means unlimited.
    pub download_limit: i32,
    pub download_count: i32,
    /// Soft-delete marker. Set once; the folder is then only purged.
    pub is_deleted: bool,
}

impl FolderRecord {
    /// Whether the download limit is reached at the current count.
    pub fn limit_reached(&self) -> bool {
        self.download_limit != 0 && self.download_count >= self.download_limit
    }

    /// Whether the expiry instant has passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_time < now
    }

    /// Whether the folder appears in the public listing.
    pub fn is_listed(&self) -> bool {
        !self.is_hidden && !self.is_deleted
    }
}

/// Data required to insert a new folder record.
#[derive(Debug, Clone)]
pub struct CreateFolderRecord {
    pub folder_id: String,
    pub folder_hash: String,
    pub file_count: i32,
    pub is_hidden: bool,
    pub password_hash: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub expire_time: DateTime<Utc>,
    pub download_limit: i32,
}

impl CreateFolderRecord {
    /// Materialize the full record with zeroed counters.
    pub fn into_record(self, id: Uuid) -> FolderRecord {
        FolderRecord {
            id,
            folder_id: self.folder_id,
            folder_hash: self.folder_hash,
            file_count: self.file_count,
            is_hidden: self.is_hidden,
            is_encrypted: self.password_hash.is_some(),
            password_hash: self.password_hash,
            upload_date: self.upload_date,
            expire_time: self.expire_time,
            download_limit: self.download_limit,
            download_count: 0,
            is_deleted: false,
        }
    }
}
