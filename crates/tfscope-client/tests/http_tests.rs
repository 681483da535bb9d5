mod common;

use common::{backend_for, sample_log_file, setup_mock_server, upload_body};
use tfscope_client::{ClientError, LogBackend};
use tfscope_types::LogLevel;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_upload_posts_multipart_file() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(body_string_contains("name=\"file\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(upload_body()))
        .expect(1)
        .mount(&server)
        .await;

    let file = sample_log_file();
    let response = backend_for(&server).upload(file.path()).await.unwrap();

    assert_eq!(response.log_id, "log_1");
    assert_eq!(response.logs.len(), 2);
    assert_eq!(response.logs[1].level, LogLevel::Error);
    assert_eq!(response.logs[1].request_id.as_deref(), Some("req-1"));
    assert_eq!(response.summary.errors(), 1);
}

#[tokio::test]
async fn test_upload_server_error_is_status_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "detail": "Error processing file: invalid utf-8"
        })))
        .mount(&server)
        .await;

    let file = sample_log_file();
    let err = backend_for(&server).upload(file.path()).await.unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("invalid utf-8"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_malformed_body_is_decode_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let file = sample_log_file();
    let err = backend_for(&server).upload(file.path()).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    let server = setup_mock_server().await;
    let err = backend_for(&server)
        .upload(std::path::Path::new("/definitely/not/here.log"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Io { .. }));
}

#[tokio::test]
async fn test_fetch_details() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/logs/log_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "summary": {"total_lines": 2, "sections": {"general": 2}},
            "logs": []
        })))
        .mount(&server)
        .await;

    let details = backend_for(&server).fetch_details("log_1").await.unwrap();
    assert_eq!(details.total_lines(), 2);
    assert!(details.describe().contains("\"general\": 2"));
}

#[tokio::test]
async fn test_fetch_details_unknown_id() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/logs/log_9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Log not found"
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server).fetch_details("log_9").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_health() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "service": "Terraform LogViewer API"
        })))
        .mount(&server)
        .await;

    let status = backend_for(&server).health().await.unwrap();
    assert_eq!(status, "healthy");
}
