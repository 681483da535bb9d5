//! Log presentation pipeline for tfscope
//!
//! Parsing, storage, filtering and projection of Terraform log entries into
//! toolkit-independent row views. The terminal UI and the HTML report are both
//! adapters over [`TableView`].

pub mod filter;
pub mod html;
pub mod overlay;
pub mod parser;
pub mod sanitize;
pub mod store;
pub mod table;
pub mod timestamp;

pub use filter::{visible_entries, visible_indices, LevelCounts, ViewFilter};
pub use html::{render_report, render_rows, ReportInput};
pub use overlay::{
    ClipboardError, ClipboardSink, CopyOutcome, DetailOverlay, OverlayError, COPIED_LABEL,
    COPY_ACK_DURATION, COPY_LABEL,
};
pub use parser::{summarize, ParsedLog, TerraformLogParser};
pub use sanitize::{escape, truncate, truncate_raw, ELLIPSIS, PLACEHOLDER};
pub use store::LogStore;
pub use table::{
    build_row, build_table, CellView, Column, LevelBadge, OverlayTarget, RenderOptions, RowView,
    TableView, MESSAGE_MAX_LEN, NO_DATA,
};
pub use timestamp::{format_timestamp, parse_timestamp, TimeZoneMode};

pub use tfscope_types::{EntryFilter, LogDetails, LogEntry, LogLevel, Summary, UploadResponse};
