use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use tfscope_logs::{ParsedLog, TerraformLogParser};
use tfscope_types::{LogDetails, UploadResponse};

use crate::backend::LogBackend;
use crate::error::{ClientError, Result};

/// Message returned for an accepted upload
pub const UPLOAD_OK_MESSAGE: &str = "File parsed successfully";

/// In-process backend running the Terraform parser
///
/// Parsed uploads are kept in memory under `log_{n}` ids for the lifetime of the
/// backend.
#[derive(Debug, Default)]
pub struct LocalBackend {
    storage: Mutex<HashMap<String, ParsedLog>>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse text directly, as if it had been uploaded
    pub fn ingest(&self, text: &str) -> UploadResponse {
        let parsed = TerraformLogParser::new().parse(text);

        let mut storage = self.storage.lock();
        let log_id = format!("log_{}", storage.len() + 1);
        let mut summary = parsed.summary.clone();
        summary.log_id = Some(log_id.clone());
        let response = UploadResponse {
            log_id: log_id.clone(),
            message: UPLOAD_OK_MESSAGE.to_string(),
            summary,
            logs: parsed.logs.clone(),
        };
        storage.insert(log_id, parsed);
        response
    }

    pub fn stored(&self) -> usize {
        self.storage.lock().len()
    }
}

#[async_trait]
impl LogBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn upload(&self, path: &Path) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| ClientError::Parse(e.to_string()))?;

        let response = self.ingest(&text);
        tracing::info!(
            log_id = %response.log_id,
            entries = response.logs.len(),
            "parsed log file locally"
        );
        Ok(response)
    }

    async fn fetch_details(&self, log_id: &str) -> Result<LogDetails> {
        let storage = self.storage.lock();
        let parsed = storage
            .get(log_id)
            .ok_or_else(|| ClientError::NotFound(log_id.to_string()))?;

        Ok(LogDetails {
            sections: serde_json::json!(parsed.summary.section_counts),
            total_lines: Some(parsed.summary.total_lines),
            summary: Some(parsed.summary.clone()),
        })
    }

    async fn health(&self) -> Result<String> {
        Ok("ok".to_string())
    }
}
