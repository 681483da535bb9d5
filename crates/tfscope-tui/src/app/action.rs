use std::path::PathBuf;

use tfscope_logs::{Column, EntryFilter};

/// All possible actions in the application (command pattern)
#[derive(Clone, Debug)]
pub enum Action {
    Quit,

    // UI toggles
    ToggleHelp,
    ToggleStats,
    ToggleLocalTime,

    // Row navigation
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,

    // Filter buttons
    SetFilter(EntryFilter),

    // Search
    OpenSearch,
    CloseSearch,
    ApplySearch,
    SearchInput(char),
    SearchBackspace,
    SearchClear,

    // Upload
    OpenUploadPrompt,
    CloseUploadPrompt,
    UploadInput(char),
    UploadBackspace,
    UploadClear,
    SubmitUpload,
    Upload(PathBuf),
    FetchDetails,

    // Detail overlay
    OpenCell(Column),
    OpenCellAt { row: usize, column: Column },
    CloseOverlay,
    CopyOverlay,
    OverlayScrollUp(u16),
    OverlayScrollDown(u16),

    ExportReport,

    // Inline messages
    DismissMessage,

    Tick,
    Render,
}
