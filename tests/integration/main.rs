//! HTTP-level integration tests against the in-memory folder store.

mod helpers;

mod download_test;
mod folder_test;
mod sweep_test;
mod token_test;
mod upload_test;
