//! # tempfiles-database
//!
//! Folder record store: the [`FolderStore`] capability trait, the
//! PostgreSQL implementation with its connection pool and migrations, and
//! an in-process implementation used for tests and single-node runs.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use repositories::{MemoryFolderStore, PgFolderRepository};
pub use store::FolderStore;
