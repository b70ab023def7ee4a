//! Folder store implementations.

pub mod folder;
pub mod memory;

pub use folder::PgFolderRepository;
pub use memory::MemoryFolderStore;
