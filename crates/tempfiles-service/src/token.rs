//! Download tokens for password-protected folders.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use tempfiles_auth::jwt::JwtEncoder;
use tempfiles_auth::password::PasswordHasher;
use tempfiles_core::error::AppError;
use tempfiles_core::result::AppResult;
use tempfiles_core::traits::BlobStore;
use tempfiles_database::FolderStore;

/// A signed token for one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verifies folder passwords and issues download tokens.
#[derive(Clone)]
pub struct TokenService {
    store: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish()
    }
}

impl TokenService {
    pub fn new(
        store: Arc<dyn FolderStore>,
        blobs: Arc<dyn BlobStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            store,
            blobs,
            hasher,
            encoder,
        }
    }

    pub async fn issue(
        &self,
        folder_id: &str,
        filename: &str,
        password: &str,
    ) -> AppResult<IssuedToken> {
        let record = self
            .store
            .get_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        if record.is_deleted {
            return Err(AppError::gone(format!("Folder {folder_id} has been deleted")));
        }
        let Some(hash) = record.password_hash.as_deref().filter(|_| record.is_encrypted) else {
            return Err(AppError::validation(format!(
                "Folder {folder_id} is not password protected"
            )));
        };
        if !self.blobs.exists(folder_id, filename).await? {
            return Err(AppError::not_found(format!(
                "File {filename} not found in folder {folder_id}"
            )));
        }

        if !self.hasher.verify_password(password, hash)? {
            warn!(folder_id, "Rejected folder password");
            return Err(AppError::unauthorized("Invalid folder password"));
        }

        let (token, expires_at) = self.encoder.issue(folder_id, filename)?;
        info!(folder_id, filename, %expires_at, "Issued download token");
        Ok(IssuedToken { token, expires_at })
    }
}
