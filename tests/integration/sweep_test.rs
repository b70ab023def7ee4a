//! Expiry sweeps observed through the HTTP surface.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use tempfiles_core::traits::BlobStore;
use tempfiles_database::FolderStore;
use tempfiles_worker::ExpirySweeper;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_expired_folder_is_swept_then_purged() {
    let app = TestApp::new().await;
    let folder_id = app
        .upload_ok(&[("a.txt", "hi")], &[("X-Time-Limit", "1")])
        .await;
    let sweeper = ExpirySweeper::new(app.store.clone(), app.blobs.clone());

    // Not yet expired.
    let summary = sweeper.soft_delete_expired(Utc::now()).await.unwrap().unwrap();
    assert_eq!(summary.scanned, 0);
    assert_eq!(
        app.get(&format!("/files/{folder_id}/a.txt")).await.status,
        StatusCode::OK
    );

    let later = Utc::now() + Duration::minutes(2);
    let summary = sweeper.soft_delete_expired(later).await.unwrap().unwrap();
    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        app.get(&format!("/files/{folder_id}/a.txt")).await.status,
        StatusCode::GONE
    );

    let summary = sweeper.purge_deleted().await.unwrap().unwrap();
    assert_eq!(summary.succeeded, 1);
    assert!(app.store.get_by_id(&folder_id).await.unwrap().is_none());
    assert!(!app.blobs.folder_exists(&folder_id).await.unwrap());
    assert_eq!(
        app.get(&format!("/files/{folder_id}/a.txt")).await.status,
        StatusCode::NOT_FOUND
    );

    // Same content can be uploaded again once purged.
    let again = app.upload(&[("a.txt", "hi")], &[]).await;
    assert_eq!(again.status, StatusCode::CREATED);
    assert_eq!(again.data()["folderId"], folder_id.as_str());
}

#[tokio::test]
async fn test_limit_reached_folder_is_purged() {
    let app = TestApp::new().await;
    let folder_id = app
        .upload_ok(&[("a.txt", "hi")], &[("X-Download-Limit", "1")])
        .await;
    app.get(&format!("/files/{folder_id}/a.txt")).await;

    let sweeper = ExpirySweeper::new(app.store.clone(), app.blobs.clone());
    let summary = sweeper.purge_deleted().await.unwrap().unwrap();

    assert_eq!(summary.succeeded, 1);
    assert!(!app.blobs.folder_exists(&folder_id).await.unwrap());
}
