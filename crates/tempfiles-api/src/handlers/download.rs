//! File download.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::Response;

use tempfiles_core::error::AppError;
use tempfiles_storage::content_type_for;

use crate::error::ApiResult;
use crate::extractors::DownloadCredential;
use crate::state::AppState;

/// GET /files/{folder_id}/{filename}
pub async fn download(
    State(state): State<AppState>,
    Path((folder_id, filename)): Path<(String, String)>,
    credential: DownloadCredential,
) -> ApiResult<Response> {
    let record = state.folders.find(&folder_id).await?;
    state
        .access_gate
        .check(record.as_ref(), &filename, credential.as_deref())?;

    let ticket = state.download_gate.admit(&folder_id, &filename).await?;
    let stream = state.download_gate.open(&ticket).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type_for(&ticket.filename))
        .header(CONTENT_DISPOSITION, ticket.content_disposition)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Failed to build download response: {e}")).into())
}
