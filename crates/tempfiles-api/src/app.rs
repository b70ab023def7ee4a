//! Application builder: wires services, router and middleware into an Axum app.

use std::sync::Arc;

use axum::Router;

use tempfiles_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use tempfiles_core::config::AppConfig;
use tempfiles_core::traits::BlobStore;
use tempfiles_database::FolderStore;
use tempfiles_service::{AccessGate, DownloadGate, FolderService, TokenService, UploadCoordinator};

use crate::router::build_router;
use crate::state::AppState;

/// Construct every service over the given record and blob stores.
pub fn build_state(
    config: AppConfig,
    store: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
) -> AppState {
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let uploads = UploadCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&blobs),
        Arc::clone(&password_hasher),
        config.upload.clone(),
    );
    let download_gate = DownloadGate::new(Arc::clone(&store), Arc::clone(&blobs));
    let access_gate = AccessGate::new(jwt_decoder);
    let folders = FolderService::new(Arc::clone(&store), Arc::clone(&blobs));
    let tokens = TokenService::new(
        Arc::clone(&store),
        Arc::clone(&blobs),
        password_hasher,
        jwt_encoder,
    );

    AppState {
        config: Arc::new(config),
        store,
        blobs,
        uploads,
        download_gate,
        access_gate,
        folders,
        tokens,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
