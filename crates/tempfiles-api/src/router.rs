//! Route definitions for the Tempfiles HTTP API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(health_routes())
        .merge(file_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::index))
        .route("/info", get(handlers::health::info))
        .route("/health", get(handlers::health::health))
}

fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::files::list_folders).post(handlers::files::upload),
        )
        .route(
            "/files/{folder_id}",
            get(handlers::files::get_folder).delete(handlers::files::delete_folder),
        )
        .route(
            "/files/{folder_id}/{filename}",
            get(handlers::download::download),
        )
        .route(
            "/files/{folder_id}/{filename}/token",
            post(handlers::token::issue_token),
        )
}
