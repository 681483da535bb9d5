//! Shared fixtures for tfscope-client tests

use std::io::Write;

use tempfile::NamedTempFile;
use tfscope_client::{ClientConfig, HttpBackend};
use wiremock::MockServer;

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::with_config(ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    })
    .expect("client should build")
}

/// A temporary Terraform log with one info and one error line
pub fn sample_log_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"{{"@level":"info","@message":"Terraform version: 1.6.0","@timestamp":"2024-01-15T10:30:00Z"}}"#
    )
    .expect("write");
    writeln!(
        file,
        r#"{{"@level":"error","@message":"Error: timeout","@timestamp":"2024-01-15T10:30:01Z","tf_req_id":"req-1"}}"#
    )
    .expect("write");
    file
}

#[allow(dead_code)]
pub fn upload_body() -> serde_json::Value {
    serde_json::json!({
        "log_id": "log_1",
        "message": "File parsed successfully",
        "summary": {
            "total_lines": 2,
            "levels": {"info": 1, "error": 1},
            "unique_requests": 1
        },
        "logs": [
            {"line_number": 1, "timestamp": "2024-01-15T10:30:00Z", "level": "info", "message": "Terraform version: 1.6.0"},
            {"line_number": 2, "timestamp": "2024-01-15T10:30:01Z", "level": "error", "message": "Error: timeout", "tf_req_id": "req-1"}
        ]
    })
}
