//! Projection of log entries into UI-toolkit independent row view-models

use tfscope_types::{LogEntry, LogLevel};

use crate::sanitize::{truncate_raw, PLACEHOLDER};
use crate::timestamp::{format_timestamp, TimeZoneMode};

/// Default display budget for the message column
pub const MESSAGE_MAX_LEN: usize = 150;

/// Text of the placeholder row drawn for an empty view
pub const NO_DATA: &str = "No data available";

/// Knobs for the row projection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub message_max_len: usize,
    pub zone: TimeZoneMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            message_max_len: MESSAGE_MAX_LEN,
            zone: TimeZoneMode::Utc,
        }
    }
}

/// What the detail overlay shows when a cell is activated
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayTarget {
    pub title: &'static str,
    /// Full, unescaped field value
    pub content: String,
}

/// A single table cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    /// Unescaped display text
    pub display: String,
    pub target: Option<OverlayTarget>,
}

impl CellView {
    fn plain(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            target: None,
        }
    }

    fn clickable(display: impl Into<String>, title: &'static str, content: &str) -> Self {
        Self {
            display: display.into(),
            target: Some(OverlayTarget {
                title,
                content: content.to_string(),
            }),
        }
    }
}

/// Severity badge
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelBadge {
    pub level: LogLevel,
    /// Upper-cased level label
    pub label: String,
    /// Style key; neutral for unrecognised levels
    pub class: &'static str,
}

impl From<&LogLevel> for LevelBadge {
    fn from(level: &LogLevel) -> Self {
        Self {
            level: level.clone(),
            label: level.label(),
            class: level.badge_class(),
        }
    }
}

/// Table columns in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    LineNumber,
    Timestamp,
    Level,
    Resource,
    Section,
    Message,
    RequestId,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Self::LineNumber,
        Self::Timestamp,
        Self::Level,
        Self::Resource,
        Self::Section,
        Self::Message,
        Self::RequestId,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::LineNumber => "#",
            Self::Timestamp => "Timestamp",
            Self::Level => "Level",
            Self::Resource => "Resource",
            Self::Section => "Section",
            Self::Message => "Message",
            Self::RequestId => "Request ID",
        }
    }
}

/// One projected log entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub line_number: u64,
    pub timestamp: CellView,
    pub level: LevelBadge,
    pub resource_type: CellView,
    pub section: CellView,
    pub message: CellView,
    pub request_id: CellView,
    /// Raw message shown as a tooltip
    pub tooltip: Option<String>,
}

impl RowView {
    /// Overlay target behind a column, if the cell is clickable
    pub fn target(&self, column: Column) -> Option<&OverlayTarget> {
        match column {
            Column::Timestamp => self.timestamp.target.as_ref(),
            Column::Message => self.message.target.as_ref(),
            Column::RequestId => self.request_id.target.as_ref(),
            Column::LineNumber | Column::Level | Column::Resource | Column::Section => None,
        }
    }
}

/// The projected table body
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableView {
    /// Drawn as a single full-width placeholder row
    Empty,
    Rows(Vec<RowView>),
}

impl TableView {
    pub fn rows(&self) -> &[RowView] {
        match self {
            Self::Empty => &[],
            Self::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of drawn rows, counting the placeholder
    pub fn drawn_rows(&self) -> usize {
        match self {
            Self::Empty => 1,
            Self::Rows(rows) => rows.len(),
        }
    }
}

fn optional_text(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Project a single entry
pub fn build_row(entry: &LogEntry, options: &RenderOptions) -> RowView {
    let timestamp_display = format_timestamp(Some(&entry.timestamp), options.zone);
    let timestamp = if entry.timestamp.is_empty() {
        CellView::plain(timestamp_display)
    } else {
        CellView::clickable(timestamp_display, "Timestamp", &entry.timestamp)
    };

    let message_display = truncate_raw(Some(&entry.message), options.message_max_len);
    let message = if entry.message.is_empty() {
        CellView::plain(message_display)
    } else {
        CellView::clickable(message_display, "Message", &entry.message)
    };

    let request_id = match entry.request_id.as_deref() {
        Some(id) if !id.is_empty() => CellView::clickable(id, "Request ID", id),
        _ => CellView::plain(PLACEHOLDER),
    };

    RowView {
        line_number: entry.line_number,
        timestamp,
        level: LevelBadge::from(&entry.level),
        resource_type: CellView::plain(optional_text(entry.resource_type.as_deref())),
        section: CellView::plain(optional_text(entry.section.as_deref())),
        message,
        request_id,
        tooltip: entry.raw_message.clone(),
    }
}

/// Project a sequence of entries, preserving order
pub fn build_table<'a>(
    entries: impl IntoIterator<Item = &'a LogEntry>,
    options: &RenderOptions,
) -> TableView {
    let rows: Vec<RowView> = entries.into_iter().map(|e| build_row(e, options)).collect();
    if rows.is_empty() {
        TableView::Empty
    } else {
        TableView::Rows(rows)
    }
}
