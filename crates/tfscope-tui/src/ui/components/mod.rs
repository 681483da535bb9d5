mod detail_overlay;
mod filter_bar;
mod help_overlay;
mod log_table;
mod stats_bar;
mod status_bar;
mod upload_prompt;

pub use detail_overlay::DetailOverlayView;
pub use filter_bar::FilterBar;
pub use help_overlay::HelpOverlay;
pub use log_table::{LogTable, COLUMN_WIDTHS};
pub use stats_bar::StatsBar;
pub use status_bar::{StatusBar, VIEWER_HINTS};
pub use upload_prompt::UploadPrompt;
