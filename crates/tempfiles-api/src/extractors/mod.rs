//! Custom Axum extractors.

pub mod credential;
pub mod upload;

pub use credential::DownloadCredential;
pub use upload::UploadSettings;
