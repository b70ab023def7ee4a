//! Download counting, limits, and headers.

use axum::http::StatusCode;
use tempfiles_database::FolderStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_example_lifecycle() {
    let app = TestApp::new().await;
    let folder_id = app.upload_ok(&[("a.txt", "hi")], &[]).await;

    let response = app.get(&format!("/files/{folder_id}/a.txt")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"hi");
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=a.txt")
    );
    assert_eq!(response.header("content-type"), Some("text/plain"));

    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert_eq!(record.download_count, 1);
    assert!(!record.is_deleted);
}

#[tokio::test]
async fn test_limit_then_gone() {
    let app = TestApp::new().await;
    let folder_id = app
        .upload_ok(&[("a.txt", "hi")], &[("X-Download-Limit", "1")])
        .await;

    let first = app.get(&format!("/files/{folder_id}/a.txt")).await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(app.store.get_by_id(&folder_id).await.unwrap().unwrap().is_deleted);

    let second = app.get(&format!("/files/{folder_id}/a.txt")).await;
    assert_eq!(second.status, StatusCode::GONE);
    assert_eq!(second.error_code(), Some("GONE"));

    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert_eq!(record.download_count, 1);
}

#[tokio::test]
async fn test_unlimited_downloads() {
    let app = TestApp::new().await;
    let folder_id = app
        .upload_ok(&[("a.txt", "hi")], &[("X-Download-Limit", "0")])
        .await;

    for _ in 0..5 {
        let response = app.get(&format!("/files/{folder_id}/a.txt")).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert_eq!(record.download_count, 5);
    assert!(!record.is_deleted);
}

#[tokio::test]
async fn test_filename_is_escaped_in_header() {
    let app = TestApp::new().await;
    let folder_id = app.upload_ok(&[("my report.txt", "data")], &[]).await;

    let response = app.get(&format!("/files/{folder_id}/my%20report.txt")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=my%20report.txt")
    );
}

#[tokio::test]
async fn test_unknown_folder_and_file() {
    let app = TestApp::new().await;
    let folder_id = app.upload_ok(&[("a.txt", "hi")], &[]).await;

    let response = app.get("/files/zzzzz/a.txt").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("NOT_FOUND"));

    let response = app.get(&format!("/files/{folder_id}/b.txt")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert_eq!(record.download_count, 0);
}
