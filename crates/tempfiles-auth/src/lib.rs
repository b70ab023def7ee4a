//! # tempfiles-auth
//!
//! Credentials for password-protected folders.
//!
//! ## Modules
//!
//! - `jwt` — download tokens scoped to one folder id and file name
//! - `password` — Argon2id hashing of folder passwords

pub mod jwt;
pub mod password;

pub use jwt::{DownloadClaims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
