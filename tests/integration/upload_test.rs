//! Upload, deduplication, and option headers.

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use tempfiles_database::FolderStore;
use tempfiles_entity::folder::FolderFilter;

use crate::helpers::TestApp;

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    serde_json::from_value(value.clone()).expect("Invalid timestamp")
}

#[tokio::test]
async fn test_upload_applies_defaults() {
    let app = TestApp::new().await;

    let response = app.upload(&[("a.txt", "hi")], &[]).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert_eq!(data["status"], "created");
    assert_eq!(data["fileCount"], 1);
    assert_eq!(data["downloadLimit"], 100);
    assert_eq!(data["downloadCount"], 0);
    assert_eq!(data["isHidden"], false);
    assert_eq!(data["isEncrypted"], false);
    assert_eq!(data["isDeleted"], false);
    assert_eq!(data["folderId"].as_str().unwrap().len(), 5);
    assert!(data.get("passwordHash").is_none());
    assert!(response.body["error"].is_null());

    let ttl = timestamp(&data["expireTime"]) - timestamp(&data["uploadDate"]);
    assert_eq!(ttl, Duration::minutes(180));

    let message = response.body["message"].as_str().unwrap();
    assert!(message.ends_with("uploaded successfully"), "{message}");
}

#[tokio::test]
async fn test_reupload_returns_existing_folder() {
    let app = TestApp::new().await;

    let first = app.upload(&[("a.txt", "hi")], &[]).await;
    let second = app
        .upload(&[("a.txt", "hi")], &[("X-Download-Limit", "1")])
        .await;

    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data()["status"], "already_exists");
    assert_eq!(first.data()["folderId"], second.data()["folderId"]);
    assert_eq!(first.data()["folderHash"], second.data()["folderHash"]);
    // Options of the second upload are ignored.
    assert_eq!(second.data()["downloadLimit"], 100);

    let message = second.body["message"].as_str().unwrap();
    assert!(message.contains("already exists"), "{message}");

    let listed = app.store.find_where(FolderFilter::Listed).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_different_content_gets_different_folder() {
    let app = TestApp::new().await;

    let a = app.upload_ok(&[("a.txt", "hi")], &[]).await;
    let b = app.upload_ok(&[("a.txt", "ho")], &[]).await;

    assert_ne!(a, b);
}

#[tokio::test]
async fn test_option_headers() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            &[("a.txt", "hi")],
            &[
                ("X-Hidden", "true"),
                ("X-Download-Limit", "3"),
                ("X-Time-Limit", "5"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert_eq!(data["isHidden"], true);
    assert_eq!(data["downloadLimit"], 3);
    let ttl = timestamp(&data["expireTime"]) - timestamp(&data["uploadDate"]);
    assert_eq!(ttl, Duration::minutes(5));
}

#[tokio::test]
async fn test_malformed_option_headers_fall_back() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            &[("a.txt", "hi")],
            &[
                ("X-Hidden", "maybe"),
                ("X-Download-Limit", "-4"),
                ("X-Time-Limit", "soon"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    assert_eq!(data["isHidden"], false);
    assert_eq!(data["downloadLimit"], 100);
    let ttl = timestamp(&data["expireTime"]) - timestamp(&data["uploadDate"]);
    assert_eq!(ttl, Duration::minutes(180));
}

#[tokio::test]
async fn test_out_of_range_time_limit_falls_back() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[("a.txt", "hi")], &[("X-Time-Limit", "1000000000000")])
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = response.data();
    let ttl = timestamp(&data["expireTime"]) - timestamp(&data["uploadDate"]);
    assert_eq!(ttl, Duration::minutes(180));

    // The same content can still be uploaded afterwards.
    let again = app.upload(&[("a.txt", "hi")], &[]).await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.data()["folderId"], data["folderId"]);
}

#[tokio::test]
async fn test_multi_file_upload() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[("a.txt", "first"), ("b.txt", "second")], &[])
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["fileCount"], 2);
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let app = TestApp::new().await;

    let response = app.upload(&[], &[]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_duplicate_names_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[("a.txt", "one"), ("a.txt", "two")], &[])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
