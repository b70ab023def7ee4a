//! # tempfiles-core
//!
//! Core crate for Tempfiles. Contains the blob storage capability trait,
//! configuration schemas, API envelope types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Tempfiles crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
