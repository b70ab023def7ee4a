//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use tempfiles_core::config::AppConfig;
use tempfiles_core::config::database::StoreBackend;
use tempfiles_database::MemoryFolderStore;
use tempfiles_storage::LocalBlobStore;

const BOUNDARY: &str = "tempfiles-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Folder store for direct inspection
    pub store: Arc<MemoryFolderStore>,
    /// Blob store rooted in `_dir`
    pub blobs: Arc<LocalBlobStore>,
    _dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.storage.root_path = dir.path().join("blobs").display().to_string();
        config.storage.io_timeout_seconds = 5;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let store = Arc::new(MemoryFolderStore::new());
        let blobs = Arc::new(
            LocalBlobStore::new(&config.storage)
                .await
                .expect("Failed to init blob store"),
        );

        let state = tempfiles_api::build_state(config, store.clone(), blobs.clone());
        let router = tempfiles_api::build_app(state);

        Self {
            router,
            store,
            blobs,
            _dir: dir,
        }
    }

    /// Upload files as a multipart body with the given option headers.
    pub async fn upload(&self, files: &[(&str, &str)], headers: &[(&str, &str)]) -> TestResponse {
        let mut body = Vec::new();
        for (name, content) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri("/files")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// Upload files with default options and return the new folder id.
    pub async fn upload_ok(&self, files: &[(&str, &str)], headers: &[(&str, &str)]) -> String {
        let response = self.upload(files, headers).await;
        assert!(
            response.status == StatusCode::CREATED || response.status == StatusCode::OK,
            "Upload failed: {:?}",
            response.body
        );
        response.data()["folderId"]
            .as_str()
            .expect("No folderId in upload response")
            .to_string()
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body, `Null` for non-JSON bodies
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The machine-readable code of an error body.
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"].as_str()
    }
}
