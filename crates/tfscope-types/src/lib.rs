//! Shared types for tfscope
//!
//! This crate contains the data structures exchanged with the log-parsing backend
//! and the filter vocabulary shared by the core pipeline and the terminal UI.

use ratatui::style::Color;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Log Types
// ============================================================================

/// Log severity level
///
/// Parsing is case-sensitive against the lower-case level names. Labels outside
/// the five known levels are kept verbatim in `Other` so the entry still renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Other(String),
}

impl LogLevel {
    /// The five levels a backend is expected to emit, in severity order
    pub fn known() -> [LogLevel; 5] {
        [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warning,
            Self::Error,
        ]
    }

    /// Wire form of the level
    pub fn as_str(&self) -> &str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }

    /// Upper-cased badge label
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Markup class for the level badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Trace => "badge-trace",
            Self::Debug => "badge-debug",
            Self::Info => "badge-info",
            Self::Warning => "badge-warning",
            Self::Error => "badge-error",
            Self::Other(_) => "badge-default",
        }
    }

    /// Get display color for this level
    pub fn color(&self) -> Color {
        match self {
            Self::Trace => Color::DarkGray,
            Self::Debug => Color::Cyan,
            Self::Info => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
            Self::Other(_) => Color::White,
        }
    }
}

impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        match s {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            // Terraform spells it "warn"
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-select filter applied before search
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum EntryFilter {
    /// Show every entry
    #[default]
    All,
    /// Only entries whose level equals this one
    Level(LogLevel),
    /// Only entries that carry a resource type
    WithResource,
}

impl EntryFilter {
    /// Filter buttons in display order
    pub fn buttons() -> Vec<EntryFilter> {
        let mut buttons = vec![Self::All];
        buttons.extend(LogLevel::known().into_iter().map(Self::Level));
        buttons.push(Self::WithResource);
        buttons
    }

    /// Get display label for this filter
    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Level(level) => level.label(),
            Self::WithResource => "Resources".to_string(),
        }
    }
}

/// A single parsed log line as returned by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Backend-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// 1-based line number in the uploaded file
    pub line_number: u64,

    /// Raw timestamp, empty when the backend had none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,

    pub level: LogLevel,

    #[serde(default)]
    pub resource_type: Option<String>,

    /// Plan/apply/general phase the line belongs to
    #[serde(default)]
    pub section: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,

    /// Unprocessed original line
    #[serde(default)]
    pub raw_message: Option<String>,

    #[serde(default, alias = "tf_req_id")]
    pub request_id: Option<String>,

    /// Backend-precomputed search haystack
    #[serde(default)]
    pub searchable_text: Option<String>,

    /// Structured payload of a JSON log line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_data: Option<serde_json::Value>,

    #[serde(default)]
    pub is_read: bool,
}

impl LogEntry {
    /// Create a new log entry with minimal fields
    pub fn new(line_number: u64, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            id: None,
            line_number,
            timestamp: String::new(),
            level,
            resource_type: None,
            section: None,
            message: message.into(),
            raw_message: None,
            request_id: None,
            searchable_text: None,
            json_data: None,
            is_read: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_raw_message(mut self, raw: impl Into<String>) -> Self {
        self.raw_message = Some(raw.into());
        self
    }

    /// Fields consulted by free-text search, in lookup order
    pub fn search_targets(&self) -> [Option<&str>; 7] {
        [
            self.searchable_text.as_deref(),
            Some(self.message.as_str()),
            self.raw_message.as_deref(),
            self.resource_type.as_deref(),
            Some(self.level.as_str()),
            self.section.as_deref(),
            self.request_id.as_deref(),
        ]
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Backend Payloads
// ============================================================================

/// Per-upload statistics
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub total_lines: u64,
    pub error_count: u64,
    pub warning_count: u64,
    pub unique_requests: u64,
    #[serde(alias = "levels")]
    pub level_counts: BTreeMap<String, u64>,
    #[serde(alias = "sections")]
    pub section_counts: BTreeMap<String, u64>,
    pub has_json_blocks: bool,
    pub log_id: Option<String>,
}

impl Summary {
    /// Count for a level from `level_counts`
    pub fn count_for(&self, level: &LogLevel) -> u64 {
        self.level_counts.get(level.as_str()).copied().unwrap_or(0)
    }

    /// Error count, derived from the level counts when the backend omits it
    pub fn errors(&self) -> u64 {
        if self.error_count > 0 {
            self.error_count
        } else {
            self.count_for(&LogLevel::Error)
        }
    }

    /// Warning count, derived from the level counts when the backend omits it
    pub fn warnings(&self) -> u64 {
        if self.warning_count > 0 {
            self.warning_count
        } else {
            self.count_for(&LogLevel::Warning) + self.level_counts.get("warn").copied().unwrap_or(0)
        }
    }
}

/// Successful upload payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub log_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// Expanded metadata for one upload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogDetails {
    #[serde(default)]
    pub sections: serde_json::Value,
    #[serde(default)]
    pub total_lines: Option<u64>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

impl LogDetails {
    /// Total line count, falling back to the embedded summary
    pub fn total_lines(&self) -> u64 {
        self.total_lines
            .or_else(|| self.summary.as_ref().map(|s| s.total_lines))
            .unwrap_or(0)
    }

    /// Plain-text rendering for the detail overlay
    pub fn describe(&self) -> String {
        let sections = if self.sections.is_null() {
            self.summary
                .as_ref()
                .map(|s| serde_json::json!(s.section_counts))
                .unwrap_or(serde_json::Value::Null)
        } else {
            self.sections.clone()
        };
        let sections = serde_json::to_string_pretty(&sections).unwrap_or_else(|_| sections.to_string());
        format!("Total lines: {}\n\nSections:\n{}", self.total_lines(), sections)
    }
}
