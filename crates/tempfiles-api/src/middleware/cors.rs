//! Cross-origin policy for browser clients.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};
use tracing::warn;

use tempfiles_core::config::app::CorsConfig;

/// CORS layer for the file API. `"*"` in origins or headers allows any.
///
/// The upload option headers and `Authorization` are always exposed to
/// preflight so browser uploads and token downloads work with a narrow
/// header list.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins(&config.allowed_origins))
        .allow_methods(parse_all::<Method>(&config.allowed_methods, "method"))
        .allow_headers(headers(&config.allowed_headers))
        .max_age(Duration::from_secs(config.max_age_seconds))
}

const API_HEADERS: [&str; 6] = [
    "authorization",
    "content-type",
    "x-hidden",
    "x-download-limit",
    "x-time-limit",
    "x-password",
];

fn origins(configured: &[String]) -> AllowOrigin {
    if is_wildcard(configured) {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(configured, "origin"))
    }
}

fn headers(configured: &[String]) -> AllowHeaders {
    if is_wildcard(configured) {
        return AllowHeaders::from(Any);
    }
    let mut names = parse_all::<HeaderName>(configured, "header");
    for name in API_HEADERS.map(HeaderName::from_static) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    AllowHeaders::list(names)
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

fn parse_all<T: std::str::FromStr>(values: &[String], what: &str) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(value = %v, "Ignoring invalid CORS {what}");
                None
            }
        })
        .collect()
}
