use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;
use tfscope_types::{LogDetails, UploadResponse};

use crate::backend::LogBackend;
use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Backend talking to the log-parsing service over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

/// Read the body, turning non-success statuses into errors
async fn checked_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "backend request failed");
        return Err(ClientError::from_status(status.as_u16(), &body));
    }
    Ok(body)
}

#[async_trait]
impl LogBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn upload(&self, path: &Path) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.log".to_string());

        tracing::info!(file = %file_name, bytes = bytes.len(), "uploading log file");

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .http_client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;

        let body = checked_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_details(&self, log_id: &str) -> Result<LogDetails> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/logs/{log_id}")))
            .send()
            .await?;

        let body = checked_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn health(&self) -> Result<String> {
        let response = self.http_client.get(self.url("/health")).send().await?;
        let body: Value = serde_json::from_str(&checked_body(response).await?)?;
        Ok(body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string())
    }
}
