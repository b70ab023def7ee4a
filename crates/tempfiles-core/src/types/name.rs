//! Validation for names that become path segments in the blob store.

use crate::error::AppError;
use crate::result::AppResult;

/// Reject values that cannot be used as a single path segment.
///
/// `what` names the value in the error message ("filename", "folder id").
pub fn validate_path_segment(what: &str, value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::validation(format!("The {what} must not be empty")));
    }
    if value == "." || value == ".." {
        return Err(AppError::validation(format!("Invalid {what}: '{value}'")));
    }
    if value.contains(['/', '\\', '\0']) {
        return Err(AppError::validation(format!(
            "The {what} must not contain path separators"
        )));
    }
    Ok(())
}
