//! Access gate for password-protected folders.

use std::sync::Arc;

use tempfiles_auth::jwt::JwtDecoder;
use tempfiles_core::error::AppError;
use tempfiles_core::result::AppResult;
use tempfiles_entity::folder::FolderRecord;

/// Checks a bearer credential against one folder and file.
pub trait CredentialValidator: Send + Sync {
    fn validate(&self, credential: &str, folder_id: &str, filename: &str) -> AppResult<()>;

    /// Accepts a credential issued for any file of the folder.
    fn validate_folder(&self, credential: &str, folder_id: &str) -> AppResult<()>;
}

impl CredentialValidator for JwtDecoder {
    fn validate(&self, credential: &str, folder_id: &str, filename: &str) -> AppResult<()> {
        self.verify_for(credential, folder_id, filename).map(|_| ())
    }

    fn validate_folder(&self, credential: &str, folder_id: &str) -> AppResult<()> {
        self.verify_folder(credential, folder_id).map(|_| ())
    }
}

/// Decides whether a download or a deletion may proceed.
///
/// Holds no state of its own: the outcome depends only on the record, the
/// presented credential and the validator.
#[derive(Clone)]
pub struct AccessGate {
    validator: Arc<dyn CredentialValidator>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish()
    }
}

impl AccessGate {
    pub fn new(validator: Arc<dyn CredentialValidator>) -> Self {
        Self { validator }
    }

    /// `Ok(())` when the folder is unknown, unencrypted, or the credential
    /// covers exactly this folder id and file name.
    pub fn check(
        &self,
        record: Option<&FolderRecord>,
        filename: &str,
        credential: Option<&str>,
    ) -> AppResult<()> {
        match protected_credential(record, credential)? {
            Some((record, token)) => self.validator.validate(token, &record.folder_id, filename),
            None => Ok(()),
        }
    }

    /// Deletion gate: an encrypted folder needs a credential issued for
    /// one of its files.
    pub fn check_folder(
        &self,
        record: Option<&FolderRecord>,
        credential: Option<&str>,
    ) -> AppResult<()> {
        match protected_credential(record, credential)? {
            Some((record, token)) => self.validator.validate_folder(token, &record.folder_id),
            None => Ok(()),
        }
    }
}

/// `None` when no credential is needed; otherwise the record and the
/// non-empty credential to validate.
fn protected_credential<'a>(
    record: Option<&'a FolderRecord>,
    credential: Option<&'a str>,
) -> AppResult<Option<(&'a FolderRecord, &'a str)>> {
    let Some(record) = record.filter(|r| r.is_encrypted) else {
        return Ok(None);
    };
    match credential {
        Some(token) if !token.is_empty() => Ok(Some((record, token))),
        _ => Err(AppError::unauthorized(format!(
            "Folder {} is password protected",
            record.folder_id
        ))),
    }
}
