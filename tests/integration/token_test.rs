//! Password-protected folders and download tokens.

use axum::http::StatusCode;
use serde_json::json;
use tempfiles_database::FolderStore;

use crate::helpers::TestApp;

async fn protected(app: &TestApp) -> String {
    let response = app
        .upload(
            &[("a.txt", "secret"), ("b.txt", "other")],
            &[("X-Password", "s3cret")],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["isEncrypted"], true);
    response.data()["folderId"].as_str().unwrap().to_string()
}

async fn token_for(app: &TestApp, folder_id: &str, filename: &str, password: &str) -> String {
    let response = app
        .request(
            "POST",
            &format!("/files/{folder_id}/{filename}/token"),
            Some(json!({ "password": password })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.data()["expiresAt"].is_string());
    response.data()["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_download_requires_token() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;

    let response = app.get(&format!("/files/{folder_id}/a.txt")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert_eq!(record.download_count, 0);
}

#[tokio::test]
async fn test_token_via_header_and_query() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;
    let token = token_for(&app, &folder_id, "a.txt", "s3cret").await;

    let response = app
        .request("GET", &format!("/files/{folder_id}/a.txt"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"secret");

    let response = app
        .get(&format!("/files/{folder_id}/a.txt?token={token}"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert_eq!(record.download_count, 2);
}

#[tokio::test]
async fn test_token_is_bound_to_file() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;
    let token = token_for(&app, &folder_id, "a.txt", "s3cret").await;

    let response = app
        .request("GET", &format!("/files/{folder_id}/b.txt"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/files/{folder_id}/a.txt"),
            None,
            Some("not-a-jwt"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/files/{folder_id}/a.txt/token"),
            Some(json!({ "password": "guess" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("UNAUTHORIZED"));
}

#[tokio::test]
async fn test_token_for_unprotected_or_unknown_folder() {
    let app = TestApp::new().await;
    let folder_id = app.upload_ok(&[("a.txt", "hi")], &[]).await;

    let response = app
        .request(
            "POST",
            &format!("/files/{folder_id}/a.txt/token"),
            Some(json!({ "password": "anything" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/files/zzzzz/a.txt/token",
            Some(json!({ "password": "anything" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_request_needs_password_field() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/files/{folder_id}/a.txt/token"),
            Some(json!({ "pass": "s3cret" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_delete_protected_folder_requires_token() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;

    let response = app
        .request("DELETE", &format!("/files/{folder_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert!(!record.is_deleted);
}

#[tokio::test]
async fn test_delete_protected_folder_with_token_for_any_file() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;
    let token = token_for(&app, &folder_id, "b.txt", "s3cret").await;

    let response = app
        .request("DELETE", &format!("/files/{folder_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["isDeleted"], true);

    let record = app.store.get_by_id(&folder_id).await.unwrap().unwrap();
    assert!(record.is_deleted);
}

#[tokio::test]
async fn test_delete_rejects_token_for_other_folder() {
    let app = TestApp::new().await;
    let folder_id = protected(&app).await;
    let other = app
        .upload(&[("c.txt", "elsewhere")], &[("X-Password", "pw")])
        .await;
    let other_id = other.data()["folderId"].as_str().unwrap().to_string();
    let token = token_for(&app, &other_id, "c.txt", "pw").await;

    let response = app
        .request("DELETE", &format!("/files/{folder_id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
