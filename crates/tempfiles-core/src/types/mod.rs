//! Shared value types.

pub mod name;
pub mod response;
pub mod upload;

pub use name::validate_path_segment;
pub use response::{ApiErrorResponse, ApiResponse};
pub use upload::{MAX_TTL_MINUTES, UploadFile, UploadOptions};
