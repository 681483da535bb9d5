use std::path::Path;

use async_trait::async_trait;
use tfscope_types::{LogDetails, UploadResponse};

use crate::error::Result;

/// Something that can turn a log file into parsed entries
#[async_trait]
pub trait LogBackend: Send + Sync {
    /// Short label shown in the header
    fn name(&self) -> &str;

    /// Upload a file and return the parsed collection
    async fn upload(&self, path: &Path) -> Result<UploadResponse>;

    /// Fetch the expanded metadata of a previous upload
    async fn fetch_details(&self, log_id: &str) -> Result<LogDetails>;

    /// Reported service status, checked once at startup
    async fn health(&self) -> Result<String>;
}
