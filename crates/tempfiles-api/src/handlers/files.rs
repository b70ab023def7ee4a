//! Upload, listing, lookup and deletion of folders.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;

use tempfiles_core::error::AppError;
use tempfiles_core::types::{ApiResponse, UploadFile};
use tempfiles_entity::folder::FolderRecord;
use tempfiles_service::{FolderDetail, UploadStatus};

use crate::dto::response::UploadResponse;
use crate::error::ApiResult;
use crate::extractors::{DownloadCredential, UploadSettings};
use crate::state::AppState;

/// Multipart field name carrying uploaded files.
pub const FILE_FIELD: &str = "file";

/// POST /files
pub async fn upload(
    State(state): State<AppState>,
    UploadSettings(options): UploadSettings,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<UploadResponse>>)> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("File part is missing a filename"))?;
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read file {name}: {e}")))?;
        files.push(UploadFile::new(name, content));
    }

    let outcome = state.uploads.upload(files, options).await?;
    let status = match outcome.status {
        UploadStatus::Created => StatusCode::CREATED,
        UploadStatus::AlreadyExists => StatusCode::OK,
    };

    Ok((
        status,
        Json(ApiResponse::ok(
            outcome.message,
            UploadResponse {
                folder: outcome.record,
                status: outcome.status,
            },
        )),
    ))
}

/// GET /files
pub async fn list_folders(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<FolderRecord>>>> {
    let folders = state.folders.list_visible().await?;
    Ok(Json(ApiResponse::ok(
        format!("{} folders", folders.len()),
        folders,
    )))
}

/// GET /files/{folder_id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> ApiResult<Json<ApiResponse<FolderDetail>>> {
    let detail = state.folders.get(&folder_id).await?;
    Ok(Json(ApiResponse::ok(
        format!("Folder {folder_id} found"),
        detail,
    )))
}

/// DELETE /files/{folder_id}
///
/// Password-protected folders need a download token for any of their files.
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    credential: DownloadCredential,
) -> ApiResult<Json<ApiResponse<FolderRecord>>> {
    let existing = state.folders.find(&folder_id).await?;
    state
        .access_gate
        .check_folder(existing.as_ref(), credential.as_deref())?;

    let record = state.folders.delete(&folder_id).await?;
    Ok(Json(ApiResponse::ok(
        format!("Folder {folder_id} deleted"),
        record,
    )))
}
