use std::time::Duration;

use farmcopilot::backend::{Backend, BackendError, Document, HttpBackend};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header_regex, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(server.uri(), Some(Duration::from_secs(5))).unwrap()
}

fn sample_document() -> Document {
    Document {
        file_name: "field-notes.pdf".to_string(),
        bytes: b"%PDF-1.4 sample".to_vec(),
    }
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_returns_response_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "When should I lime the field?" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "In autumn, after harvest." })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let reply = assert_ok!(backend.chat("When should I lime the field?").await);
    assert_eq!(reply, "In autumn, after harvest.");
}

#[tokio::test]
async fn test_chat_missing_response_field_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "wrong key" })))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = assert_err!(backend.chat("hello").await);
    assert!(matches!(err, BackendError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_chat_non_json_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = assert_err!(backend.chat("hello").await);
    assert!(matches!(err, BackendError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_chat_server_error_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("index not loaded"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = assert_err!(backend.chat("hello").await);
    assert_eq!(
        err,
        BackendError::Api {
            status: 500,
            message: "index not loaded".to_string(),
        }
    );
    assert!(err.to_string().contains("HTTP 500"));
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_returns_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Indexed 3 pages from field-notes.pdf" })),
        )
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let message = assert_ok!(backend.upload(sample_document()).await);
    assert_eq!(
        message.as_deref(),
        Some("Indexed 3 pages from field-notes.pdf")
    );
}

#[tokio::test]
async fn test_upload_without_message_is_still_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let message = assert_ok!(backend.upload(sample_document()).await);
    assert_eq!(message, None);
}

#[tokio::test]
async fn test_upload_sends_multipart_file_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"field-notes.pdf\""))
        .and(body_string_contains("%PDF-1.4 sample"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    assert_ok!(backend.upload(sample_document()).await);
}

#[tokio::test]
async fn test_upload_rejection_with_json_message_is_shown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Only PDF files are supported" })),
        )
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let message = assert_ok!(backend.upload(sample_document()).await);
    assert_eq!(message.as_deref(), Some("Only PDF files are supported"));
}

#[tokio::test]
async fn test_upload_rejection_without_json_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = assert_err!(backend.upload(sample_document()).await);
    assert_eq!(
        err,
        BackendError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        }
    );
}

#[tokio::test]
async fn test_upload_success_with_non_json_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("done"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = assert_err!(backend.upload(sample_document()).await);
    assert!(matches!(err, BackendError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_upload_to_unreachable_backend_is_network_error() {
    // Grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let backend = HttpBackend::new(
        format!("http://127.0.0.1:{port}"),
        Some(Duration::from_secs(2)),
    )
    .unwrap();

    let err = assert_err!(backend.upload(sample_document()).await);
    assert!(matches!(err, BackendError::Network(_)), "got {err:?}");
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let status = assert_ok!(backend.health().await);
    assert_eq!(status, "ok");
}

#[tokio::test]
async fn test_trailing_slash_in_origin_is_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(format!("{}/", mock_server.uri()), None).unwrap();
    assert_ok!(backend.health().await);
}
