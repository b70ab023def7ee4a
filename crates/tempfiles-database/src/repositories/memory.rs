//! In-process folder store.
//!
//! Each record sits behind its own async mutex so that concurrent downloads
//! of one folder serialize their increment-and-check while different
//! folders proceed independently.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Mutex;
use uuid::Uuid;

use tempfiles_core::error::AppError;
use tempfiles_core::result::AppResult;
use tempfiles_entity::folder::{CreateFolderRecord, FolderFilter, FolderPatch, FolderRecord};

use crate::store::FolderStore;

#[derive(Debug)]
struct Slot {
    id: Uuid,
    folder_hash: String,
    record: Mutex<FolderRecord>,
}

/// Folder store held in process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryFolderStore {
    /// Keyed by public folder id.
    folders: DashMap<String, Arc<Slot>>,
    /// folder_hash -> folder_id
    hashes: DashMap<String, String>,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, folder_id: &str) -> Option<Arc<Slot>> {
        self.folders.get(folder_id).map(|s| Arc::clone(s.value()))
    }

    fn slots(&self) -> Vec<Arc<Slot>> {
        self.folders.iter().map(|s| Arc::clone(s.value())).collect()
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn get_by_id(&self, folder_id: &str) -> AppResult<Option<FolderRecord>> {
        match self.slot(folder_id) {
            Some(slot) => Ok(Some(slot.record.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn get_by_hash(&self, folder_hash: &str) -> AppResult<Option<FolderRecord>> {
        let folder_id = match self.hashes.get(folder_hash) {
            Some(entry) => entry.value().clone(),
            None => return Ok(None),
        };
        self.get_by_id(&folder_id).await
    }

    async fn exists_by_hash(&self, folder_hash: &str) -> AppResult<bool> {
        Ok(self.hashes.contains_key(folder_hash))
    }

    async fn insert(&self, data: CreateFolderRecord) -> AppResult<FolderRecord> {
        let record = data.into_record(Uuid::now_v7());

        // Lock order: hashes before folders.
        let hash_entry = match self.hashes.entry(record.folder_hash.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Folder with hash {} already exists",
                    record.folder_hash
                )));
            }
            Entry::Vacant(entry) => entry,
        };
        match self.folders.entry(record.folder_id.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Folder {} already exists",
                    record.folder_id
                )));
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Slot {
                    id: record.id,
                    folder_hash: record.folder_hash.clone(),
                    record: Mutex::new(record.clone()),
                }));
            }
        }
        hash_entry.insert(record.folder_id.clone());

        Ok(record)
    }

    async fn update_fields(
        &self,
        folder_id: &str,
        patch: &FolderPatch,
    ) -> AppResult<Option<FolderRecord>> {
        patch.validate()?;
        let Some(slot) = self.slot(folder_id) else {
            return Ok(None);
        };

        let mut record = slot.record.lock().await;
        patch.apply_to(&mut record)?;
        Ok(Some(record.clone()))
    }

    async fn record_download(&self, folder_id: &str) -> AppResult<Option<FolderRecord>> {
        let Some(slot) = self.slot(folder_id) else {
            return Ok(None);
        };

        let mut record = slot.record.lock().await;
        if record.is_deleted {
            return Ok(None);
        }
        record.download_count += 1;
        if record.limit_reached() {
            record.is_deleted = true;
        }
        Ok(Some(record.clone()))
    }

    async fn find_where(&self, filter: FolderFilter) -> AppResult<Vec<FolderRecord>> {
        let mut matched = Vec::new();
        for slot in self.slots() {
            let record = slot.record.lock().await;
            if filter.matches(&record) {
                matched.push(record.clone());
            }
        }

        match filter {
            FolderFilter::ExpiredBefore(_) => matched.sort_by_key(|r| r.expire_time),
            FolderFilter::Deleted => matched.sort_by_key(|r| r.upload_date),
            FolderFilter::Listed => matched.sort_by(|a, b| b.upload_date.cmp(&a.upload_date)),
        }
        Ok(matched)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let key = self
            .folders
            .iter()
            .find(|s| s.value().id == id)
            .map(|s| s.key().clone());
        let Some(key) = key else {
            return Ok(false);
        };

        match self.folders.remove(&key) {
            Some((_, slot)) => {
                self.hashes.remove(&slot.folder_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
