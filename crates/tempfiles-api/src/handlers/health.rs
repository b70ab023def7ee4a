//! Service metadata and health check handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use tempfiles_core::traits::BlobStore;
use tempfiles_core::types::ApiResponse;
use tempfiles_database::FolderStore;

use crate::dto::request::InfoQuery;
use crate::dto::response::{
    ComponentHealth, EndpointDetail, EndpointSummary, HealthResponse, IndexResponse, InfoResponse,
};
use crate::state::AppState;

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "api is working normally :)".to_string(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

struct Endpoint {
    handler: &'static str,
    method: &'static str,
    path: &'static str,
    desc: &'static str,
    command: &'static str,
}

const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        handler: "upload",
        method: "POST",
        path: "/files",
        desc: "Upload one or more files as a new folder.",
        command: "curl -X POST -F 'file=@<path>' <host>/files",
    },
    Endpoint {
        handler: "list",
        method: "GET",
        path: "/files",
        desc: "List folders that are not hidden or deleted.",
        command: "curl <host>/files",
    },
    Endpoint {
        handler: "get",
        method: "GET",
        path: "/files/{folder_id}",
        desc: "Show a folder and the files inside it.",
        command: "curl <host>/files/<folder_id>",
    },
    Endpoint {
        handler: "del",
        method: "DELETE",
        path: "/files/{folder_id}",
        desc: "Delete a folder. Protected folders need a download token.",
        command: "curl -X DELETE <host>/files/<folder_id>",
    },
    Endpoint {
        handler: "dl",
        method: "GET",
        path: "/files/{folder_id}/{filename}",
        desc: "Download one file. Protected folders need a download token.",
        command: "curl -O <host>/files/<folder_id>/<filename>",
    },
    Endpoint {
        handler: "token",
        method: "POST",
        path: "/files/{folder_id}/{filename}/token",
        desc: "Exchange a folder password for a download token.",
        command: "curl -X POST -H 'Content-Type: application/json' \
                  -d '{\"password\":\"<password>\"}' <host>/files/<folder_id>/<filename>/token",
    },
];

/// GET /info
///
/// `?api=<handler>` describes one endpoint; anything else lists them all.
pub async fn info(Query(query): Query<InfoQuery>) -> Json<InfoResponse> {
    let selected = query
        .api
        .as_deref()
        .and_then(|name| ENDPOINTS.iter().find(|e| e.handler == name));

    let body = match selected {
        Some(endpoint) => InfoResponse::Detail(EndpointDetail {
            api_name: endpoint.path.to_string(),
            method: endpoint.method.to_string(),
            desc: endpoint.desc.to_string(),
            command: endpoint.command.to_string(),
        }),
        None => InfoResponse::Catalog(
            ENDPOINTS
                .iter()
                .map(|e| EndpointSummary {
                    api_url: e.path.to_string(),
                    api_handler: e.handler.to_string(),
                })
                .collect(),
        ),
    };
    Json(body)
}

/// GET /health
///
/// Responds 503 when either backend reports unhealthy.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store_ok = state.store.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Folder store health check failed");
        false
    });
    let blobs_ok = state.blobs.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Blob store health check failed");
        false
    });

    let healthy = store_ok && blobs_ok;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: ComponentHealth {
            backend: state.store.backend().to_string(),
            healthy: store_ok,
        },
        blobs: ComponentHealth {
            backend: state.blobs.backend().to_string(),
            healthy: blobs_ok,
        },
    };

    (status, Json(ApiResponse::ok("health check", body)))
}
