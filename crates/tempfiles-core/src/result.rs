//! Convenience result type alias for Tempfiles.

use crate::error::AppError;

/// A specialized `Result` type for Tempfiles operations.
pub type AppResult<T> = Result<T, AppError>;
