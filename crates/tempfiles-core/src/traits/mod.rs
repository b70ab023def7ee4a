//! Core traits defined in `tempfiles-core` and implemented by other crates.

pub mod blob;

pub use blob::{BlobStore, ByteStream};
