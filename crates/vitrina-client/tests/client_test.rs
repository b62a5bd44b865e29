//! Upload client integration tests against a local in-process server.
//!
//! Run with: `cargo test -p vitrina-client --test client_test`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use vitrina_client::progress::{ProgressObserver, PROGRESS_CHUNK_BYTES};
use vitrina_client::recorder::{upload_and_record, MediaRecorder};
use vitrina_client::UploadClient;
use vitrina_core::{MediaRecord, MediaType, Role, SessionContext};

/// Minimal stand-in for the upload server: echoes the filename back in the URL.
async fn echo_upload(mut multipart: Multipart) -> (StatusCode, Json<serde_json::Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("file").to_string();
            let data = field.bytes().await.unwrap_or_default();
            return (
                StatusCode::OK,
                Json(serde_json::json!({
                    "url": format!("https://pub-test.r2.dev/1700000000000_{}", filename),
                    "received_bytes": data.len(),
                })),
            );
        }
    }
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "no file provided" })),
    )
}

async fn failing_upload() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "upload failed", "details": "bucket unreachable" })),
    )
}

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_echo_server() -> String {
    spawn_server(
        Router::new()
            .route("/api/upload", post(echo_upload))
            .layer(DefaultBodyLimit::max(32 * 1024 * 1024)),
    )
    .await
}

#[derive(Default)]
struct CountingRecorder {
    records: Mutex<Vec<MediaRecord>>,
    calls: AtomicUsize,
}

#[async_trait]
impl MediaRecorder for CountingRecorder {
    async fn record(&self, record: &MediaRecord) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingObserver {
    percents: Mutex<Vec<u8>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, _sent: u64, _total: u64, percent: u8) {
        self.percents.lock().unwrap().push(percent);
    }
}

#[tokio::test]
async fn upload_bytes_returns_the_public_url() {
    let base_url = spawn_echo_server().await;
    let client = UploadClient::new(base_url).unwrap();

    let response = client
        .upload_bytes(Bytes::from_static(b"hello"), "hello.txt", "text/plain")
        .await
        .unwrap();

    assert_eq!(
        response.url,
        "https://pub-test.r2.dev/1700000000000_hello.txt"
    );
}

#[tokio::test]
async fn upload_file_reads_from_disk() {
    let base_url = spawn_echo_server().await;
    let client = UploadClient::new(base_url).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    tokio::fs::write(&path, b"\x89PNGdata").await.unwrap();

    let response = client.upload_file(&path).await.unwrap();
    assert!(response.url.ends_with("_photo.png"));
}

#[tokio::test]
async fn progress_reaches_100_over_the_wire() {
    let base_url = spawn_echo_server().await;
    let client = UploadClient::new(base_url).unwrap();
    let observer = Arc::new(RecordingObserver::default());

    let data = Bytes::from(vec![42u8; PROGRESS_CHUNK_BYTES * 10]);
    let response = client
        .upload_bytes_with_progress(data, "big.bin", "application/octet-stream", observer.clone())
        .await
        .unwrap();

    assert!(response.url.ends_with("_big.bin"));

    let percents = observer.percents.lock().unwrap().clone();
    assert!(!percents.is_empty());
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*percents.last().unwrap(), 100);
}

#[tokio::test]
async fn server_error_surfaces_the_response_body() {
    let base_url = spawn_server(Router::new().route("/api/upload", post(failing_upload))).await;
    let client = UploadClient::new(base_url).unwrap();

    let err = client
        .upload_bytes(Bytes::from_static(b"x"), "a.txt", "text/plain")
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("upload failed"));
}

#[tokio::test]
async fn record_written_only_after_confirmed_upload() {
    let base_url = spawn_echo_server().await;
    let client = UploadClient::new(base_url).unwrap();
    let recorder = CountingRecorder::default();
    let session = SessionContext::new(Role::Admin);

    let record = upload_and_record(
        &client,
        &session,
        &recorder,
        7,
        Bytes::from_static(b"\x89PNGdata"),
        "photo.png",
        "image/png",
    )
    .await
    .unwrap();

    assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(record.category_id, 7);
    assert_eq!(record.media_type, MediaType::Image);
    assert_eq!(record.extension.as_deref(), Some("png"));
    assert!(record.file_url.ends_with("_photo.png"));
}

#[tokio::test]
async fn failed_upload_writes_no_record() {
    let base_url = spawn_server(Router::new().route("/api/upload", post(failing_upload))).await;
    let client = UploadClient::new(base_url).unwrap();
    let recorder = CountingRecorder::default();
    let session = SessionContext::new(Role::Admin);

    let result = upload_and_record(
        &client,
        &session,
        &recorder,
        7,
        Bytes::from_static(b"x"),
        "a.txt",
        "text/plain",
    )
    .await;

    assert!(result.is_err());
    assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_admin_is_rejected_before_any_request() {
    // Unroutable base URL: a rejected session must not produce traffic.
    let client = UploadClient::new("http://127.0.0.1:9".to_string()).unwrap();
    let recorder = CountingRecorder::default();
    let session = SessionContext::new(Role::User);

    let err = upload_and_record(
        &client,
        &session,
        &recorder,
        7,
        Bytes::from_static(b"x"),
        "a.txt",
        "text/plain",
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("admin"));
    assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
}
