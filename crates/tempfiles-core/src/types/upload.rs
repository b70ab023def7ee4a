//! Upload input types shared by the service and storage layers.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::config::upload::UploadConfig;

/// Longest accepted folder lifetime: 365 days.
pub const MAX_TTL_MINUTES: i64 = 365 * 24 * 60;

/// One file part of an upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name as sent by the client.
    pub name: String,
    /// File contents.
    pub content: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Per-upload settings after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOptions {
    /// Exclude the folder from the public listing.
    pub hidden: bool,
    /// Maximum successful downloads; `0` means unlimited.
    pub download_limit: i32,
    /// Minutes until the folder becomes eligible for soft-deletion.
    pub ttl_minutes: i64,
    /// Optional password; when set the folder is encrypted.
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl UploadOptions {
    /// Build options from raw, possibly missing or malformed, inputs.
    ///
    /// Unparsable values fall back to the configured defaults. A negative
    /// download limit is treated as invalid, as is a TTL outside
    /// `1..=MAX_TTL_MINUTES`.
    pub fn from_raw(
        defaults: &UploadConfig,
        hidden: Option<&str>,
        download_limit: Option<&str>,
        ttl_minutes: Option<&str>,
        password: Option<&str>,
    ) -> Self {
        let hidden = hidden
            .and_then(parse_bool)
            .unwrap_or(defaults.default_hidden);
        let download_limit = download_limit
            .and_then(|v| v.trim().parse::<i32>().ok())
            .filter(|v| *v >= 0)
            .unwrap_or(defaults.default_download_limit);
        let ttl_minutes = ttl_minutes
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| (1..=MAX_TTL_MINUTES).contains(v))
            .unwrap_or(defaults.default_ttl_minutes);
        let password = password
            .map(str::to_string)
            .filter(|p| !p.is_empty());

        Self {
            hidden,
            download_limit,
            ttl_minutes,
            password,
        }
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        let defaults = UploadConfig::default();
        Self {
            hidden: defaults.default_hidden,
            download_limit: defaults.default_download_limit,
            ttl_minutes: defaults.default_ttl_minutes,
            password: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
