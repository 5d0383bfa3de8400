//! Multipart upload against an in-process axum server.

#![cfg(feature = "http")]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use feed_sync::{
    progress_channel, upload_reporting, AttachmentUploader, Draft, FeedController, FeedStore,
    HttpUploader, InMemoryCache, Media, MediaHandle, MediaKind, UploadError, UploadProgress,
    UploaderConfig,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq)]
struct ReceivedField {
    name: Option<String>,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

type Received = Arc<Mutex<Vec<ReceivedField>>>;

async fn accept(State(received): State<Received>, mut multipart: Multipart) -> Json<Value> {
    let mut link = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap().to_vec();
        link = file_name.as_ref().map(|f| format!("https://cdn.test/{}", f));
        received.lock().unwrap().push(ReceivedField {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    Json(json!({ "link": link }))
}

async fn drain(mut multipart: Multipart) {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let _ = field.bytes().await.unwrap();
    }
}

async fn nested(multipart: Multipart) -> Json<Value> {
    drain(multipart).await;
    Json(json!({ "data": { "link": "https://cdn.test/nested" } }))
}

async fn broken(multipart: Multipart) -> (StatusCode, Json<Value>) {
    drain(multipart).await;
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" })))
}

async fn no_link(multipart: Multipart) -> Json<Value> {
    drain(multipart).await;
    Json(json!({ "ok": true }))
}

async fn slow(multipart: Multipart) -> Json<Value> {
    drain(multipart).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "link": "https://cdn.test/too-late" }))
}

async fn serve() -> (SocketAddr, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/upload", post(accept))
        .route("/nested", post(nested))
        .route("/broken", post(broken))
        .route("/no-link", post(no_link))
        .route("/slow", post(slow))
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, received)
}

fn local_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    format!("file://{}", path.display())
}

fn uploader(addr: SocketAddr, path: &str, timeout_ms: u64) -> HttpUploader {
    HttpUploader::new(UploaderConfig {
        endpoint: format!("http://{}{}", addr, path),
        timeout_ms,
        field_name: "file".into(),
    })
}

#[tokio::test]
async fn uploads_file_field_and_reads_link() {
    let (addr, received) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let handle = MediaHandle::new(local_file(&dir, "beach.png", b"\x89PNG fake"), "image/png");

    let (reporter, receiver) = progress_channel();
    let reference = upload_reporting(&uploader(addr, "/upload", 5_000), &handle, Some(reporter))
        .await
        .unwrap();

    assert_eq!(reference.url, "https://cdn.test/beach.png");
    assert_eq!(reference.kind, MediaKind::Image);

    let fields = received.lock().unwrap().clone();
    assert_eq!(
        fields,
        vec![ReceivedField {
            name: Some("file".into()),
            file_name: Some("beach.png".into()),
            content_type: Some("image/png".into()),
            bytes: b"\x89PNG fake".to_vec(),
        }]
    );

    let events = receiver.until_terminal().await;
    assert_eq!(events.first(), Some(&UploadProgress::Progress(0)));
    assert!(matches!(events.last(), Some(UploadProgress::Completed(_))));
}

#[tokio::test]
async fn nested_link_is_accepted() {
    let (addr, _) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let handle = MediaHandle::new(local_file(&dir, "a.mp4", b"mp4"), "video/mp4");

    let reference = uploader(addr, "/nested", 5_000)
        .upload(&handle, None)
        .await
        .unwrap();
    assert_eq!(reference.url, "https://cdn.test/nested");
    assert_eq!(reference.kind, MediaKind::Video);
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let (addr, _) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let handle = MediaHandle::new(local_file(&dir, "a.png", b"png"), "image/png");

    let err = uploader(addr, "/broken", 5_000)
        .upload(&handle, None)
        .await
        .unwrap_err();
    assert_eq!(err, UploadError::Rejected { status: 500 });
}

#[tokio::test]
async fn success_without_link_is_a_failure() {
    let (addr, _) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let handle = MediaHandle::new(local_file(&dir, "a.png", b"png"), "image/png");

    let err = uploader(addr, "/no-link", 5_000)
        .upload(&handle, None)
        .await
        .unwrap_err();
    assert_eq!(err, UploadError::MissingLink);
}

#[tokio::test]
async fn slow_server_hits_the_timeout() {
    let (addr, _) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let handle = MediaHandle::new(local_file(&dir, "a.png", b"png"), "image/png");

    let err = uploader(addr, "/slow", 200)
        .upload(&handle, None)
        .await
        .unwrap_err();
    assert_eq!(err, UploadError::Timeout(Duration::from_millis(200)));
}

#[tokio::test]
async fn failed_http_upload_still_publishes_the_post() {
    let (addr, _) = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let uri = local_file(&dir, "notes.pdf", b"%PDF");
    let handle = MediaHandle::new(uri.clone(), "application/pdf").with_name("Notes");

    let store = Arc::new(FeedStore::new(InMemoryCache::new(), Vec::new()));
    let mut feed = FeedController::new(store, Default::default());
    feed.start().await.unwrap();

    let receipt = feed
        .composer(uploader(addr, "/broken", 5_000))
        .submit(Draft::new("Kate", "notes").with_attachment(handle), None)
        .await
        .unwrap();
    assert_eq!(receipt.fallback, Some(UploadError::Rejected { status: 500 }));

    let post = feed.next_post().await.unwrap().unwrap();
    assert_eq!(post.media, Some(Media::document(uri, Some("Notes".into()))));
}
