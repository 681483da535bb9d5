//! Terminal UI for tfscope
//!
//! State management, keybindings, settings, event handling and the ratatui
//! widgets that draw the log presentation pipeline.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, InputMode, MessageKind, StatusMessage, UiState};
pub use clipboard::{Osc52Clipboard, SystemClipboard};
pub use config::{ConfigError, KeyBinding, KeyBindings, KeyContext, Settings};
pub use tui::{Event, EventHandler, Tui};
pub use ui::components::{
    DetailOverlayView, FilterBar, HelpOverlay, LogTable, StatsBar, StatusBar, UploadPrompt,
};
pub use ui::screens::LogViewerScreen;
pub use ui::{Layout, Theme};
