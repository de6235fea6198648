use crate::common::{mount_bytes, mount_status};
use page_gallery::pipeline::{build_http_client, fetch_to_file};
use page_gallery::FetchError;
use url::Url;
use wiremock::MockServer;

#[tokio::test]
async fn test_fetch_to_file_writes_body() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0..=255u8).cycle().take(256 * 1024).collect();
    mount_bytes(&server, "/blob.bin", body.clone(), "application/octet-stream").await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("blob.bin");
    let client = build_http_client("test-agent/1.0").unwrap();
    let url = Url::parse(&format!("{}/blob.bin", server.uri())).unwrap();

    let written = fetch_to_file(&client, &url, &dest).await.unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), body);
}

#[tokio::test]
async fn test_fetch_to_file_overwrites_destination() {
    let server = MockServer::start().await;
    mount_bytes(&server, "/new.txt", b"new".to_vec(), "text/plain").await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("file.txt");
    std::fs::write(&dest, "old content that is longer").unwrap();

    let client = build_http_client("test-agent/1.0").unwrap();
    let url = Url::parse(&format!("{}/new.txt", server.uri())).unwrap();
    fetch_to_file(&client, &url, &dest).await.unwrap();

    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new");
}

#[tokio::test]
async fn test_fetch_to_file_rejects_error_status() {
    let server = MockServer::start().await;
    mount_status(&server, "/gone.png", 404).await;

    let dir = tempfile::tempdir().unwrap();
    let client = build_http_client("test-agent/1.0").unwrap();
    let url = Url::parse(&format!("{}/gone.png", server.uri())).unwrap();

    let result = fetch_to_file(&client, &url, &dir.path().join("gone.png")).await;

    match result {
        Err(FetchError::Status { url: failed, status }) => {
            assert_eq!(status, 404);
            assert!(failed.ends_with("/gone.png"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_to_file_reports_write_failure() {
    let server = MockServer::start().await;
    mount_bytes(&server, "/a.png", b"abc".to_vec(), "image/png").await;

    let dir = tempfile::tempdir().unwrap();
    let client = build_http_client("test-agent/1.0").unwrap();
    let url = Url::parse(&format!("{}/a.png", server.uri())).unwrap();
    let dest = dir.path().join("missing-folder").join("a.png");

    let result = fetch_to_file(&client, &url, &dest).await;
    assert!(matches!(result, Err(FetchError::Write { .. })));
}

#[tokio::test]
async fn test_fetch_to_file_connection_refused() {
    let dir = tempfile::tempdir().unwrap();
    let client = build_http_client("test-agent/1.0").unwrap();
    let url = Url::parse("http://127.0.0.1:9/x.png").unwrap();

    let result = fetch_to_file(&client, &url, &dir.path().join("x.png")).await;
    assert!(matches!(result, Err(FetchError::Http { .. })));
}
