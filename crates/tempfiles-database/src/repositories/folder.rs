//! PostgreSQL folder repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use tempfiles_core::error::{AppError, ErrorKind};
use tempfiles_core::result::AppResult;
use tempfiles_entity::folder::{CreateFolderRecord, FolderFilter, FolderPatch, FolderRecord};

use crate::store::FolderStore;

/// Repository for folder records backed by the `folders` table.
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for PgFolderRepository {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn get_by_id(&self, folder_id: &str) -> AppResult<Option<FolderRecord>> {
        sqlx::query_as::<_, FolderRecord>("SELECT * FROM folders WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn get_by_hash(&self, folder_hash: &str) -> AppResult<Option<FolderRecord>> {
        sqlx::query_as::<_, FolderRecord>("SELECT * FROM folders WHERE folder_hash = $1")
            .bind(folder_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find folder by hash", e)
            })
    }

    async fn exists_by_hash(&self, folder_hash: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM folders WHERE folder_hash = $1)")
            .bind(folder_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check folder hash", e)
            })
    }

    async fn insert(&self, data: CreateFolderRecord) -> AppResult<FolderRecord> {
        let record = data.into_record(Uuid::now_v7());
        sqlx::query_as::<_, FolderRecord>(
            "INSERT INTO folders (id, folder_id, folder_hash, file_count, is_hidden, is_encrypted, \
             password_hash, upload_date, expire_time, download_limit, download_count, is_deleted) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(record.id)
        .bind(&record.folder_id)
        .bind(&record.folder_hash)
        .bind(record.file_count)
        .bind(record.is_hidden)
        .bind(record.is_encrypted)
        .bind(&record.password_hash)
        .bind(record.upload_date)
        .bind(record.expire_time)
        .bind(record.download_limit)
        .bind(record.download_count)
        .bind(record.is_deleted)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique_violation {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("Folder {} already exists", record.folder_id),
                    e,
                )
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create folder", e)
            }
        })
    }

    async fn update_fields(
        &self,
        folder_id: &str,
        patch: &FolderPatch,
    ) -> AppResult<Option<FolderRecord>> {
        patch.validate()?;
        let updated = sqlx::query_as::<_, FolderRecord>(
            "UPDATE folders SET download_count = COALESCE($2, download_count), \
             is_deleted = COALESCE($3, is_deleted) \
             WHERE folder_id = $1 AND ($2::INTEGER IS NULL OR $2 >= download_count) \
             RETURNING *",
        )
        .bind(folder_id)
        .bind(patch.download_count)
        .bind(patch.is_deleted)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update folder", e))?;

        // No row: either the folder is absent or the count would go down.
        match (updated, patch.download_count) {
            (None, Some(count)) => match self.get_by_id(folder_id).await? {
                Some(current) => Err(AppError::validation(format!(
                    "Download count of folder {folder_id} cannot go from {} to {count}",
                    current.download_count
                ))),
                None => Ok(None),
            },
            (updated, _) => Ok(updated),
        }
    }

    async fn record_download(&self, folder_id: &str) -> AppResult<Option<FolderRecord>> {
        // SET expressions see the pre-update row, hence the `+ 1` in the flag.
        sqlx::query_as::<_, FolderRecord>(
            "UPDATE folders SET download_count = download_count + 1, \
             is_deleted = (download_limit <> 0 AND download_count + 1 >= download_limit) \
             WHERE folder_id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record download", e))
    }

    async fn find_where(&self, filter: FolderFilter) -> AppResult<Vec<FolderRecord>> {
        let query = match filter {
            FolderFilter::ExpiredBefore(now) => sqlx::query_as::<_, FolderRecord>(
                "SELECT * FROM folders WHERE is_deleted = FALSE AND expire_time < $1 \
                 ORDER BY expire_time",
            )
            .bind(now),
            FolderFilter::Deleted => sqlx::query_as::<_, FolderRecord>(
                "SELECT * FROM folders WHERE is_deleted = TRUE ORDER BY upload_date",
            ),
            FolderFilter::Listed => sqlx::query_as::<_, FolderRecord>(
                "SELECT * FROM folders WHERE is_deleted = FALSE AND is_hidden = FALSE \
                 ORDER BY upload_date DESC",
            ),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to scan folders", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;
        Ok(result.rows_affected() > 0)
    }
}
