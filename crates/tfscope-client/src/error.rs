use thiserror::Error;

/// Errors raised by a log backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected payload
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Uploaded file could not be processed
    #[error("error processing file: {0}")]
    Parse(String),

    #[error("log not found: {0}")]
    NotFound(String),
}

impl ClientError {
    /// Build a status error, preferring the backend's `detail` field as the message
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                let body = body.trim();
                if body.is_empty() {
                    "no response body".to_string()
                } else {
                    body.to_string()
                }
            });

        if status == 404 {
            Self::NotFound(message)
        } else {
            Self::Status { status, message }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
