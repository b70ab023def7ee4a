//! # tempfiles-api
//!
//! HTTP API layer for Tempfiles built on Axum.
//!
//! Provides the upload, download, token, listing, and health endpoints,
//! request extractors, CORS and logging middleware, and the mapping from
//! [`AppError`](tempfiles_core::AppError) to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use state::AppState;
