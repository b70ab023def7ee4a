//! Upload defaults.

use serde::{Deserialize, Serialize};

/// Defaults applied when an upload omits or garbles its per-request options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Whether new folders are excluded from the public listing.
    #[serde(default)]
    pub default_hidden: bool,
    /// Download limit; `0` means unlimited.
    #[serde(default = "default_download_limit")]
    pub default_download_limit: i32,
    /// Time-to-live in minutes.
    #[serde(default = "default_ttl_minutes")]
    pub default_ttl_minutes: i64,
    /// Maximum number of file parts accepted in one upload.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_hidden: false,
            default_download_limit: default_download_limit(),
            default_ttl_minutes: default_ttl_minutes(),
            max_files: default_max_files(),
        }
    }
}

fn default_download_limit() -> i32 {
    100
}

fn default_ttl_minutes() -> i64 {
    180
}

fn default_max_files() -> usize {
    64
}
