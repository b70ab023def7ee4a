//! Download token issuance for password-protected folders.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use tempfiles_core::error::AppError;
use tempfiles_core::types::ApiResponse;
use tempfiles_service::IssuedToken;

use crate::dto::TokenRequest;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /files/{folder_id}/{filename}/token
pub async fn issue_token(
    State(state): State<AppState>,
    Path((folder_id, filename)): Path<(String, String)>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<IssuedToken>>> {
    let Json(request) =
        body.map_err(|e| AppError::validation(format!("Invalid token request: {e}")))?;

    let issued = state
        .tokens
        .issue(&folder_id, &filename, &request.password)
        .await?;
    Ok(Json(ApiResponse::ok("Token issued", issued)))
}
