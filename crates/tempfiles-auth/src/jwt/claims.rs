//! Claims carried by a download token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A token grants downloading exactly one file of one folder, and managing
/// that folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadClaims {
    /// Public folder id.
    pub folder_id: String,
    /// File name inside the folder.
    pub filename: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id, for log correlation.
    pub jti: Uuid,
}

impl DownloadClaims {
    /// Whether the claims cover the given folder and file.
    pub fn grants(&self, folder_id: &str, filename: &str) -> bool {
        self.folder_id == folder_id && self.filename == filename
    }

    /// Whether the claims were issued for a file of the given folder.
    pub fn covers_folder(&self, folder_id: &str) -> bool {
        self.folder_id == folder_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
