//! # tempfiles-storage
//!
//! Blob store implementations for Tempfiles. Only the local filesystem
//! backend ships; anything implementing
//! [`BlobStore`](tempfiles_core::traits::BlobStore) can replace it.

pub mod local;
pub mod mime;

pub use local::LocalBlobStore;
pub use mime::content_type_for;
