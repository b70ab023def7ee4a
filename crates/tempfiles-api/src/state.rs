//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tempfiles_core::config::AppConfig;
use tempfiles_core::traits::BlobStore;
use tempfiles_database::FolderStore;
use tempfiles_service::{AccessGate, DownloadGate, FolderService, TokenService, UploadCoordinator};

/// Passed to every Axum handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    pub store: Arc<dyn FolderStore>,
    pub blobs: Arc<dyn BlobStore>,

    // ── Services ─────────────────────────────────────────────
    pub uploads: UploadCoordinator,
    pub download_gate: DownloadGate,
    pub access_gate: AccessGate,
    pub folders: FolderService,
    pub tokens: TokenService,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend())
            .field("blobs", &self.blobs.backend())
            .finish()
    }
}
