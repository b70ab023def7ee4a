//! Response payloads carried inside `ApiResponse::data`.

use serde::{Deserialize, Serialize};

use tempfiles_entity::folder::FolderRecord;
use tempfiles_service::UploadStatus;

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    pub message: String,
    pub api_version: String,
}

/// `GET /info`: one entry per endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    pub api_url: String,
    pub api_handler: String,
}

/// `GET /info?api=<handler>`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDetail {
    pub api_name: String,
    pub method: String,
    pub desc: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoResponse {
    Detail(EndpointDetail),
    Catalog(Vec<EndpointSummary>),
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    pub version: String,
    pub store: ComponentHealth,
    pub blobs: ComponentHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub backend: String,
    pub healthy: bool,
}

/// Upload result: the folder record plus whether it was newly created.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub folder: FolderRecord,
    pub status: UploadStatus,
}
