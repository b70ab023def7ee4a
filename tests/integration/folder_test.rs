//! Listing, lookup, deletion, and service metadata.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_index_and_health() {
    let app = TestApp::new().await;

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["apiVersion"], env!("CARGO_PKG_VERSION"));
    assert!(response.body["message"].is_string());

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"]["backend"], "memory");
    assert_eq!(response.data()["blobs"]["backend"], "local");
}

#[tokio::test]
async fn test_info_describes_endpoints() {
    let app = TestApp::new().await;

    let response = app.get("/info").await;
    assert_eq!(response.status, StatusCode::OK);
    let catalog = response.body.as_array().unwrap();
    let handlers: Vec<_> = catalog
        .iter()
        .map(|e| e["apiHandler"].as_str().unwrap())
        .collect();
    assert!(handlers.contains(&"upload"));
    assert!(handlers.contains(&"dl"));

    let response = app.get("/info?api=del").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["method"], "DELETE");
    assert_eq!(response.body["apiName"], "/files/{folder_id}");
    assert!(response.body["command"].as_str().unwrap().starts_with("curl"));

    let response = app.get("/info?api=nope").await;
    assert!(response.body.is_array());
}

#[tokio::test]
async fn test_list_hides_hidden_folders() {
    let app = TestApp::new().await;
    let visible = app.upload_ok(&[("a.txt", "visible")], &[]).await;
    app.upload_ok(&[("b.txt", "hidden")], &[("X-Hidden", "1")])
        .await;

    let response = app.get("/files").await;

    assert_eq!(response.status, StatusCode::OK);
    let folders = response.data().as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["folderId"], visible.as_str());
}

#[tokio::test]
async fn test_get_folder_lists_files() {
    let app = TestApp::new().await;
    let folder_id = app
        .upload_ok(&[("b.txt", "b"), ("a.txt", "a")], &[])
        .await;

    let response = app.get(&format!("/files/{folder_id}")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folderId"], folder_id.as_str());
    assert_eq!(response.data()["files"], serde_json::json!(["a.txt", "b.txt"]));

    let response = app.get("/files/zzzzz").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_soft_deletes() {
    let app = TestApp::new().await;
    let folder_id = app.upload_ok(&[("a.txt", "hi")], &[]).await;

    let response = app
        .request("DELETE", &format!("/files/{folder_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["isDeleted"], true);

    assert_eq!(
        app.get(&format!("/files/{folder_id}")).await.status,
        StatusCode::GONE
    );
    assert_eq!(
        app.get(&format!("/files/{folder_id}/a.txt")).await.status,
        StatusCode::GONE
    );
    let again = app
        .request("DELETE", &format!("/files/{folder_id}"), None, None)
        .await;
    assert_eq!(again.status, StatusCode::GONE);

    assert!(app.get("/files").await.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_reupload_of_deleted_content_conflicts() {
    let app = TestApp::new().await;
    let folder_id = app.upload_ok(&[("a.txt", "hi")], &[]).await;
    app.request("DELETE", &format!("/files/{folder_id}"), None, None)
        .await;

    let response = app.upload(&[("a.txt", "hi")], &[]).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("CONFLICT"));
}
