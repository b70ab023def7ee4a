//! Partial updates to a folder record.

use tempfiles_core::{AppError, AppResult};

use super::FolderRecord;

/// Fields to change on a folder record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPatch {
    pub download_count: Option<i32>,
    pub is_deleted: Option<bool>,
}

impl FolderPatch {
    /// A patch that only flips the soft-delete marker.
    pub fn soft_delete() -> Self {
        Self {
            download_count: None,
            is_deleted: Some(true),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.download_count.is_none() && self.is_deleted.is_none()
    }

    /// Reject patches no stored record may receive: empty ones, negative
    /// counts, and clearing the soft-delete marker.
    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(AppError::validation("Folder update has no fields"));
        }
        if self.download_count.is_some_and(|c| c < 0) {
            return Err(AppError::validation("Download count cannot be negative"));
        }
        if self.is_deleted == Some(false) {
            return Err(AppError::validation("A deleted folder cannot be restored"));
        }
        Ok(())
    }

    /// Validate against the current record and apply in place.
    ///
    /// The download count never decreases.
    pub fn apply_to(&self, record: &mut FolderRecord) -> AppResult<()> {
        self.validate()?;
        if let Some(count) = self.download_count {
            if count < record.download_count {
                return Err(AppError::validation(format!(
                    "Download count of folder {} cannot go from {} to {count}",
                    record.folder_id, record.download_count
                )));
            }
            record.download_count = count;
        }
        if let Some(deleted) = self.is_deleted {
            record.is_deleted = deleted;
        }
        Ok(())
    }
}
