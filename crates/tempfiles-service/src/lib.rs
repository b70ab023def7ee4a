//! # tempfiles-service
//!
//! The file lifecycle: identity derivation, upload deduplication, the
//! download gate with its limit enforcement, the access gate for
//! password-protected folders, and folder listing and deletion.
//!
//! Services take their store and blob backends as `Arc<dyn ...>` at
//! construction time.

pub mod access;
pub mod download;
pub mod folder;
pub mod identity;
pub mod token;
pub mod upload;

pub use access::{AccessGate, CredentialValidator};
pub use download::{DownloadGate, DownloadTicket};
pub use folder::{FolderDetail, FolderService};
pub use identity::FolderIdentity;
pub use token::{IssuedToken, TokenService};
pub use upload::{UploadCoordinator, UploadOutcome, UploadStatus};
