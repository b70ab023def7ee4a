//! Bulk scan predicates over folder records.

use chrono::{DateTime, Utc};

use super::model::FolderRecord;

/// Selection used by listing and by the sweeper phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderFilter {
    /// Not deleted and expired before the given instant.
    ExpiredBefore(DateTime<Utc>),
    /// Soft-deleted and awaiting purge.
    Deleted,
    /// Neither hidden nor deleted.
    Listed,
}

impl FolderFilter {
    /// Evaluate the predicate in-process.
    pub fn matches(&self, record: &FolderRecord) -> bool {
        match self {
            Self::ExpiredBefore(now) => !record.is_deleted && record.is_expired_at(*now),
            Self::Deleted => record.is_deleted,
            Self::Listed => record.is_listed(),
        }
    }
}
