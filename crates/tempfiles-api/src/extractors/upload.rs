//! `UploadSettings` extractor: reads upload options from request headers.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use tempfiles_core::types::UploadOptions;

use crate::error::ApiError;
use crate::state::AppState;

pub const HIDDEN_HEADER: &str = "x-hidden";
pub const DOWNLOAD_LIMIT_HEADER: &str = "x-download-limit";
pub const TIME_LIMIT_HEADER: &str = "x-time-limit";
pub const PASSWORD_HEADER: &str = "x-password";

/// Upload options with configured defaults applied to absent or
/// malformed headers.
#[derive(Debug, Clone)]
pub struct UploadSettings(pub UploadOptions);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

impl FromRequestParts<AppState> for UploadSettings {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;
        Ok(UploadSettings(UploadOptions::from_raw(
            state.uploads.defaults(),
            header(headers, HIDDEN_HEADER),
            header(headers, DOWNLOAD_LIMIT_HEADER),
            header(headers, TIME_LIMIT_HEADER),
            header(headers, PASSWORD_HEADER),
        )))
    }
}
