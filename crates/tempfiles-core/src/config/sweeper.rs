//! Expiry sweeper configuration.

use serde::{Deserialize, Serialize};

/// Timers for the two sweeper phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper is scheduled at boot.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between soft-delete scans for expired folders.
    #[serde(default = "default_soft_delete_interval")]
    pub soft_delete_interval_seconds: u64,
    /// Seconds between purges of soft-deleted folders.
    #[serde(default = "default_purge_interval")]
    pub purge_interval_seconds: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            soft_delete_interval_seconds: default_soft_delete_interval(),
            purge_interval_seconds: default_purge_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_soft_delete_interval() -> u64 {
    60
}

fn default_purge_interval() -> u64 {
    300
}
