//! Folder domain entities.

pub mod filter;
pub mod model;
pub mod patch;

pub use filter::FolderFilter;
pub use model::{CreateFolderRecord, FolderRecord};
pub use patch::FolderPatch;
