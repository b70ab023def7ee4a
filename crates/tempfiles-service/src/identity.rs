//! Content-derived folder identity.

use sha2::{Digest, Sha256};

use tempfiles_core::error::AppError;
use tempfiles_core::result::AppResult;
use tempfiles_core::types::UploadFile;

/// Length of the public folder id, in hex characters.
pub const FOLDER_ID_LEN: usize = 5;

/// Identity of an uploaded file set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderIdentity {
    /// Lowercase hex SHA-256 over the ordered names and contents.
    pub folder_hash: String,
    /// URL-safe prefix of the hash used as the public id.
    pub folder_id: String,
}

impl FolderIdentity {
    /// Derive the identity of an ordered set of files.
    ///
    /// Each name and content is length-prefixed so that moving bytes
    /// between a name and a content, or between adjacent files, changes
    /// the hash.
    pub fn derive(files: &[UploadFile]) -> AppResult<Self> {
        if files.is_empty() {
            return Err(AppError::validation("No files were provided"));
        }

        let mut hasher = Sha256::new();
        for file in files {
            hasher.update((file.name.len() as u64).to_be_bytes());
            hasher.update(file.name.as_bytes());
            hasher.update((file.content.len() as u64).to_be_bytes());
            hasher.update(&file.content);
        }
        let folder_hash = hex::encode(hasher.finalize());
        let folder_id = folder_hash[..FOLDER_ID_LEN].to_string();

        Ok(Self {
            folder_hash,
            folder_id,
        })
    }
}
