//! Tempfiles server: ephemeral file sharing.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use tempfiles_core::config::AppConfig;
use tempfiles_core::config::database::StoreBackend;
use tempfiles_core::error::AppError;
use tempfiles_core::traits::BlobStore;
use tempfiles_database::{DatabasePool, FolderStore, MemoryFolderStore, PgFolderRepository};
use tempfiles_storage::LocalBlobStore;
use tempfiles_worker::{ExpirySweeper, SweepScheduler};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `TEMPFILES_ENV` overlay, and environment
/// variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TEMPFILES_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Tempfiles v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Folder record store ──────────────────────────────
    let (store, db_pool): (Arc<dyn FolderStore>, Option<DatabasePool>) =
        match config.database.backend {
            StoreBackend::Postgres => {
                let db_pool = DatabasePool::connect(&config.database).await?;
                tracing::info!("Running database migrations...");
                tempfiles_database::migration::run_migrations(db_pool.pool()).await?;
                let repo: Arc<dyn FolderStore> =
                    Arc::new(PgFolderRepository::new(db_pool.pool().clone()));
                (repo, Some(db_pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory folder store; records are lost on restart");
                let memory: Arc<dyn FolderStore> = Arc::new(MemoryFolderStore::new());
                (memory, None)
            }
        };

    if !store.health_check().await? {
        return Err(AppError::database("Folder store failed its startup health check"));
    }

    // ── Step 2: Blob store ───────────────────────────────────────
    let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&config.storage).await?);
    if !blobs.health_check().await? {
        return Err(AppError::storage(format!(
            "Blob root {} is not a writable directory",
            config.storage.root_path
        )));
    }

    // ── Step 3: Expiry sweeper ───────────────────────────────────
    let scheduler = if config.sweeper.enabled {
        let sweeper = ExpirySweeper::new(Arc::clone(&store), Arc::clone(&blobs));
        let scheduler = SweepScheduler::new(sweeper, config.sweeper.clone()).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Expiry sweeper disabled");
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = tempfiles_api::build_state(config, store, blobs);
    let app = tempfiles_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Tempfiles server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    let serving = tokio::spawn(async move { server.await });
    let result = tokio::select! {
        joined = serving => joined
            .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Server error: {e}"))),
        _ = async {
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "In-flight requests did not finish in time");
            Ok(())
        }
    };

    // ── Step 6: Stop background tasks ────────────────────────────
    if let Some(scheduler) = scheduler {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Failed to stop sweep scheduler");
        }
    }
    if let Some(db_pool) = db_pool {
        db_pool.close().await;
    }

    tracing::info!("Tempfiles server shut down gracefully");
    result
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
