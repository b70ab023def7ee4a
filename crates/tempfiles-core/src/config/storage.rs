//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Local blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory; each folder lives at `<root>/<folder_id>/`.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Upper bound in seconds for a single blob I/O operation.
    #[serde(default = "default_io_timeout")]
    pub io_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            io_timeout_seconds: default_io_timeout(),
        }
    }
}

fn default_root_path() -> String {
    "./tmp".to_string()
}

fn default_io_timeout() -> u64 {
    60
}
