use std::path::PathBuf;
use std::time::Instant;

use ratatui::layout::{Position, Rect};
use tfscope_logs::{
    build_table, render_report, visible_indices, ClipboardSink, Column, CopyOutcome,
    DetailOverlay, EntryFilter, LogDetails, LogStore, RenderOptions, ReportInput, RowView,
    TableView, TimeZoneMode, UploadResponse,
};

use super::Action;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Cache for the projected table to avoid re-filtering on every render
#[derive(Default)]
pub struct ViewCache {
    /// Store revision the cache was built from
    cached_revision: Option<u64>,
    cached_options: Option<RenderOptions>,
    /// Store indices of the visible entries, in display order
    pub indices: Vec<usize>,
    pub view: Option<TableView>,
}

impl ViewCache {
    pub fn needs_refresh(&self, revision: u64, options: RenderOptions) -> bool {
        self.view.is_none()
            || self.cached_revision != Some(revision)
            || self.cached_options != Some(options)
    }

    pub fn update(
        &mut self,
        revision: u64,
        options: RenderOptions,
        indices: Vec<usize>,
        view: TableView,
    ) {
        self.cached_revision = Some(revision);
        self.cached_options = Some(options);
        self.indices = indices;
        self.view = Some(view);
    }
}

/// Which text field, if any, is receiving keystrokes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Upload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Dismissible inline message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

/// Screen regions recorded during the last render, for mouse hit-testing
#[derive(Clone, Debug, Default)]
pub struct HitAreas {
    pub table: Rect,
    /// Y of the first body row
    pub first_row_y: u16,
    pub columns: Vec<(Column, Rect)>,
    pub filter_buttons: Vec<(EntryFilter, Rect)>,
    pub overlay: Option<Rect>,
    pub copy_button: Option<Rect>,
}

/// UI-specific transient state
pub struct UiState {
    pub input_mode: InputMode,

    /// Search input text as typed
    pub search_input: String,

    /// Upload path prompt text
    pub upload_input: String,

    pub help_visible: bool,

    /// Show the summary statistics bar?
    pub stats_visible: bool,

    pub message: Option<StatusMessage>,

    /// Selected row, as an index into the visible rows
    pub selected: usize,

    /// First visible row
    pub scroll: usize,

    /// Visible body rows at the last render
    pub page_size: usize,

    pub zone: TimeZoneMode,

    pub message_max_len: usize,

    pub view_cache: ViewCache,

    pub hit_areas: HitAreas,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Normal,
            search_input: String::new(),
            upload_input: String::new(),
            help_visible: false,
            stats_visible: false,
            message: None,
            selected: 0,
            scroll: 0,
            page_size: 20,
            zone: TimeZoneMode::Utc,
            message_max_len: tfscope_logs::MESSAGE_MAX_LEN,
            view_cache: ViewCache::default(),
            hit_areas: HitAreas::default(),
        }
    }
}

/// Global application state
pub struct AppState {
    /// Entries of the last accepted upload plus filter and search
    pub store: LogStore,

    pub overlay: DetailOverlay,

    pub ui_state: UiState,

    /// Label of the active backend
    pub backend_name: String,

    /// File behind the loaded collection
    pub source_file: Option<PathBuf>,

    /// File of the upload in flight
    pending_file: Option<PathBuf>,

    pub upload_in_flight: bool,

    pub details_in_flight: bool,

    spinner_tick: usize,

    /// Whether app should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(backend_name: impl Into<String>) -> Self {
        Self {
            store: LogStore::new(),
            overlay: DetailOverlay::new(),
            ui_state: UiState::default(),
            backend_name: backend_name.into(),
            source_file: None,
            pending_file: None,
            upload_in_flight: false,
            details_in_flight: false,
            spinner_tick: 0,
            should_quit: false,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            message_max_len: self.ui_state.message_max_len,
            zone: self.ui_state.zone,
        }
    }

    /// Rebuild the projected table if the store or render options changed
    pub fn refresh_view(&mut self) -> &TableView {
        let options = self.render_options();
        let revision = self.store.revision();

        if self.ui_state.view_cache.needs_refresh(revision, options) {
            let indices = visible_indices(&self.store);
            let entries = self.store.entries();
            let view = build_table(indices.iter().map(|&i| &entries[i]), &options);
            self.ui_state
                .view_cache
                .update(revision, options, indices, view);
            self.clamp_selection();
        }

        self.ui_state
            .view_cache
            .view
            .get_or_insert(TableView::Empty)
    }

    /// Number of visible rows (0 for the placeholder view)
    pub fn visible_len(&mut self) -> usize {
        self.refresh_view().rows().len()
    }

    pub fn selected_row(&mut self) -> Option<&RowView> {
        let selected = self.ui_state.selected;
        self.refresh_view().rows().get(selected)
    }

    fn clamp_selection(&mut self) {
        let len = self.ui_state.view_cache.indices.len();
        self.ui_state.selected = self.ui_state.selected.min(len.saturating_sub(1));
        self.ui_state.scroll = self.ui_state.scroll.min(self.ui_state.selected);
    }

    fn reset_selection(&mut self) {
        self.ui_state.selected = 0;
        self.ui_state.scroll = 0;
    }

    // ------------------------------------------------------------------
    // Navigation; ignored while the overlay is open
    // ------------------------------------------------------------------

    pub fn scroll_locked(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn select_row(&mut self, row: usize) {
        if self.scroll_locked() {
            return;
        }
        let len = self.visible_len();
        self.ui_state.selected = row.min(len.saturating_sub(1));
    }

    pub fn scroll_up(&mut self, n: usize) {
        let row = self.ui_state.selected.saturating_sub(n);
        self.select_row(row);
    }

    pub fn scroll_down(&mut self, n: usize) {
        let row = self.ui_state.selected.saturating_add(n);
        self.select_row(row);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.ui_state.page_size.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.ui_state.page_size.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.select_row(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.select_row(usize::MAX);
    }

    /// Keep the selected row inside a viewport of `height` rows
    pub fn follow_selection(&mut self, height: usize) {
        let ui = &mut self.ui_state;
        ui.page_size = height;
        if height == 0 {
            return;
        }
        if ui.selected < ui.scroll {
            ui.scroll = ui.selected;
        } else if ui.selected >= ui.scroll + height {
            ui.scroll = ui.selected + 1 - height;
        }
    }

    // ------------------------------------------------------------------
    // Filter and search
    // ------------------------------------------------------------------

    pub fn set_filter(&mut self, filter: EntryFilter) {
        tracing::debug!(filter = %filter.label(), "filter selected");
        self.store.set_filter(filter);
        self.reset_selection();
    }

    pub fn start_search(&mut self) {
        self.ui_state.input_mode = InputMode::Search;
        self.ui_state.search_input = self.store.search_term().to_string();
    }

    /// Add a character and narrow the view immediately
    pub fn search_input_char(&mut self, c: char) {
        self.ui_state.search_input.push(c);
        self.sync_search();
    }

    pub fn search_input_backspace(&mut self) {
        self.ui_state.search_input.pop();
        self.sync_search();
    }

    pub fn search_clear(&mut self) {
        self.ui_state.search_input.clear();
        self.sync_search();
    }

    fn sync_search(&mut self) {
        self.store.set_search_term(self.ui_state.search_input.as_str());
        self.reset_selection();
    }

    /// Leave search input, keeping the term
    pub fn apply_search(&mut self) {
        self.ui_state.input_mode = InputMode::Normal;
    }

    /// Leave search input and drop the term
    pub fn cancel_search(&mut self) {
        self.ui_state.input_mode = InputMode::Normal;
        self.search_clear();
    }

    // ------------------------------------------------------------------
    // Upload and details
    // ------------------------------------------------------------------

    pub fn open_upload_prompt(&mut self) {
        self.ui_state.input_mode = InputMode::Upload;
        self.ui_state.upload_input = self
            .source_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
    }

    pub fn close_upload_prompt(&mut self) {
        self.ui_state.input_mode = InputMode::Normal;
        self.ui_state.upload_input.clear();
    }

    pub fn upload_input_char(&mut self, c: char) {
        self.ui_state.upload_input.push(c);
    }

    pub fn upload_input_backspace(&mut self) {
        self.ui_state.upload_input.pop();
    }

    pub fn upload_clear(&mut self) {
        self.ui_state.upload_input.clear();
    }

    /// Close the prompt and start an upload of the entered path
    pub fn submit_upload(&mut self) -> Option<PathBuf> {
        let path = self.ui_state.upload_input.trim().to_string();
        if path.is_empty() {
            self.show_error("Please enter a file path".to_string());
            return None;
        }
        self.close_upload_prompt();
        self.begin_upload(PathBuf::from(path))
    }

    /// Mark an upload as in flight; refused while another one is pending
    pub fn begin_upload(&mut self, path: PathBuf) -> Option<PathBuf> {
        if self.upload_in_flight {
            self.show_info("An upload is already in progress".to_string());
            return None;
        }
        self.upload_in_flight = true;
        self.show_info(format!("Uploading {}...", path.display()));
        self.pending_file = Some(path.clone());
        Some(path)
    }

    /// Handle the upload result; the store is only touched on success
    pub fn finish_upload(&mut self, result: Result<UploadResponse, String>) {
        self.upload_in_flight = false;
        let file = self.pending_file.take();

        match result {
            Ok(response) => {
                let count = response.logs.len();
                let log_id = response.log_id.clone();
                let status = response.message.clone();
                self.store.replace(response);
                self.overlay.close();
                self.reset_selection();
                // the replaced store starts without a search term
                self.ui_state.search_input.clear();
                if self.ui_state.input_mode == InputMode::Search {
                    self.ui_state.input_mode = InputMode::Normal;
                }
                self.source_file = file;
                tracing::info!(log_id = %log_id, entries = count, "upload accepted");
                let text = if status.is_empty() {
                    format!("Loaded {count} entries ({log_id})")
                } else {
                    format!("{status}: {count} entries ({log_id})")
                };
                self.show_info(text);
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload failed");
                self.show_error(format!("Upload failed: {e}"));
            }
        }
    }

    /// Log id to fetch details for, if a fetch may start now
    pub fn begin_details(&mut self) -> Option<String> {
        if self.details_in_flight {
            return None;
        }
        match self.store.log_id() {
            Some(id) => {
                let id = id.to_string();
                self.details_in_flight = true;
                Some(id)
            }
            None => {
                self.show_error("No log loaded yet".to_string());
                None
            }
        }
    }

    pub fn finish_details(&mut self, result: Result<LogDetails, String>) {
        self.details_in_flight = false;
        match result {
            Ok(details) => self.overlay.open("Log details", details.describe()),
            Err(e) => {
                tracing::warn!(error = %e, "details fetch failed");
                self.show_error(format!("Failed to fetch details: {e}"));
            }
        }
    }

    pub fn finish_health(&mut self, result: Result<String, String>) {
        match result {
            Ok(status) => tracing::info!(backend = %self.backend_name, %status, "backend reachable"),
            Err(e) => {
                tracing::warn!(backend = %self.backend_name, error = %e, "health check failed");
                self.show_error(format!("Backend unreachable: {e}"));
            }
        }
    }

    // ------------------------------------------------------------------
    // Detail overlay
    // ------------------------------------------------------------------

    /// Open the overlay on a cell of the selected row; absent fields do nothing
    pub fn open_cell(&mut self, column: Column) {
        let target = self
            .selected_row()
            .and_then(|row| row.target(column))
            .cloned();
        if let Some(target) = target {
            self.overlay.open_target(&target);
        }
    }

    pub fn open_cell_at(&mut self, row: usize, column: Column) {
        self.select_row(row);
        if self.ui_state.selected == row {
            self.open_cell(column);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close();
    }

    pub fn copy_overlay(
        &mut self,
        primary: &mut dyn ClipboardSink,
        fallback: &mut dyn ClipboardSink,
        now: Instant,
    ) {
        match self.overlay.copy_current_content(primary, fallback, now) {
            Ok(CopyOutcome::Primary) => {}
            Ok(CopyOutcome::Fallback) => {
                self.show_info(format!("Copied via {}", fallback.name()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                self.show_error(e.to_string());
            }
        }
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    /// Translate a left click at (x, y) into an action
    pub fn click_action(&self, x: u16, y: u16) -> Option<Action> {
        let pos = Position { x, y };
        let areas = &self.ui_state.hit_areas;

        if self.ui_state.help_visible {
            return Some(Action::ToggleHelp);
        }

        if self.overlay.is_open() {
            if areas.copy_button.is_some_and(|r| r.contains(pos)) {
                return Some(Action::CopyOverlay);
            }
            return match areas.overlay {
                Some(r) if r.contains(pos) => None,
                _ => Some(Action::CloseOverlay),
            };
        }

        if let Some((filter, _)) = areas.filter_buttons.iter().find(|(_, r)| r.contains(pos)) {
            return Some(Action::SetFilter(filter.clone()));
        }

        if !areas.table.contains(pos) || y < areas.first_row_y {
            return None;
        }
        let row = self.ui_state.scroll + usize::from(y - areas.first_row_y);
        if row >= self.ui_state.view_cache.indices.len() {
            return None;
        }
        areas
            .columns
            .iter()
            .find(|(_, r)| x >= r.x && x < r.x + r.width)
            .map(|&(column, _)| Action::OpenCellAt { row, column })
    }

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------

    pub fn toggle_local_time(&mut self) {
        self.ui_state.zone = self.ui_state.zone.toggled();
    }

    /// Advance the spinner and expire the copy acknowledgment
    pub fn tick(&mut self, now: Instant) {
        if self.upload_in_flight || self.details_in_flight {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
        self.overlay.expire_ack(now);
    }

    /// Spinner frame while a request is pending
    pub fn spinner(&self) -> Option<char> {
        (self.upload_in_flight || self.details_in_flight)
            .then(|| SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()])
    }

    /// Standalone HTML document of the current view
    pub fn report_html(&mut self, generated_at: &str) -> String {
        self.refresh_view();
        let empty = TableView::Empty;
        let table = self.ui_state.view_cache.view.as_ref().unwrap_or(&empty);
        render_report(&ReportInput {
            log_id: self.store.log_id(),
            summary: self.store.summary(),
            filter: self.store.active_filter(),
            search_term: self.store.search_term(),
            total_entries: self.store.len(),
            table,
            generated_at,
        })
    }

    /// `{log_id}_{stamp}.html`, keeping only `[A-Za-z0-9_-]` of the backend id
    pub fn export_filename(&self, stamp: &str) -> String {
        let stem: String = self
            .store
            .log_id()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        let stem = if stem.is_empty() { "tfscope" } else { stem.as_str() };
        format!("{stem}_{stamp}.html")
    }

    pub fn show_info(&mut self, text: String) {
        self.ui_state.message = Some(StatusMessage {
            text,
            kind: MessageKind::Info,
        });
    }

    pub fn show_error(&mut self, text: String) {
        self.ui_state.message = Some(StatusMessage {
            text,
            kind: MessageKind::Error,
        });
    }

    pub fn dismiss_message(&mut self) {
        self.ui_state.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfscope_logs::{ClipboardError, LogEntry, LogLevel, COPIED_LABEL};

    fn response(log_id: &str) -> UploadResponse {
        UploadResponse {
            log_id: log_id.to_string(),
            message: "File parsed successfully".to_string(),
            summary: Default::default(),
            logs: vec![
                LogEntry::new(1, LogLevel::Info, "starting")
                    .with_timestamp("2024-01-15T10:30:00.500Z"),
                LogEntry::new(2, LogLevel::Error, "Error: timeout").with_request_id("req-1"),
                LogEntry::new(3, LogLevel::Warning, "deprecated"),
            ],
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::new("local");
        let path = state.begin_upload(PathBuf::from("plan.log"));
        assert!(path.is_some());
        state.finish_upload(Ok(response("log_1")));
        state
    }

    struct Sink(bool);

    impl ClipboardSink for Sink {
        fn name(&self) -> &'static str {
            "test"
        }

        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            if self.0 {
                Ok(())
            } else {
                Err(ClipboardError("unavailable".into()))
            }
        }
    }

    #[test]
    fn test_second_upload_refused_while_pending() {
        let mut state = AppState::new("local");
        assert!(state.begin_upload(PathBuf::from("a.log")).is_some());
        assert!(state.spinner().is_some());
        assert!(state.begin_upload(PathBuf::from("b.log")).is_none());
        assert!(state.upload_in_flight);
    }

    #[test]
    fn test_failed_upload_keeps_store() {
        let mut state = loaded();
        state.begin_upload(PathBuf::from("other.log"));
        state.finish_upload(Err("connection refused".into()));

        assert!(!state.upload_in_flight);
        assert!(state.spinner().is_none());
        assert_eq!(state.store.log_id(), Some("log_1"));
        assert_eq!(state.visible_len(), 3);
        assert_eq!(state.source_file, Some(PathBuf::from("plan.log")));
        let message = state.ui_state.message.as_ref().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.contains("connection refused"));
    }

    #[test]
    fn test_new_upload_resets_filter_and_search() {
        let mut state = loaded();
        state.set_filter(EntryFilter::Level(LogLevel::Error));
        state.start_search();
        state.search_input_char('t');
        assert_eq!(state.visible_len(), 1);

        state.begin_upload(PathBuf::from("next.log"));
        state.finish_upload(Ok(response("log_2")));
        assert_eq!(state.store.active_filter(), &EntryFilter::All);
        assert_eq!(state.store.search_term(), "");
        assert_eq!(state.visible_len(), 3);
    }

    #[test]
    fn test_live_search_narrows_view() {
        let mut state = loaded();
        state.start_search();
        for c in "TIME".chars() {
            state.search_input_char(c);
        }
        assert_eq!(state.visible_len(), 1);
        state.cancel_search();
        assert_eq!(state.visible_len(), 3);
        assert_eq!(state.ui_state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_filter_with_no_matches_is_placeholder() {
        let mut state = loaded();
        state.set_filter(EntryFilter::Level(LogLevel::Trace));
        assert!(state.refresh_view().is_empty());
        assert_eq!(state.refresh_view().drawn_rows(), 1);
    }

    #[test]
    fn test_open_cell_and_scroll_lock() {
        let mut state = loaded();
        state.scroll_down(1);
        state.open_cell(Column::RequestId);
        assert!(state.overlay.is_open());
        assert_eq!(state.overlay.title(), "Request ID");
        assert_eq!(state.overlay.content(), "req-1");

        state.scroll_down(1);
        assert_eq!(state.ui_state.selected, 1);

        state.close_overlay();
        state.scroll_down(1);
        assert_eq!(state.ui_state.selected, 2);
    }

    #[test]
    fn test_absent_field_opens_nothing() {
        let mut state = loaded();
        state.open_cell(Column::RequestId);
        assert!(!state.overlay.is_open());
    }

    #[test]
    fn test_reopen_overwrites() {
        let mut state = loaded();
        state.open_cell(Column::Timestamp);
        assert_eq!(state.overlay.content(), "2024-01-15T10:30:00.500Z");
        state.open_cell(Column::Message);
        assert_eq!(state.overlay.title(), "Message");
        assert_eq!(state.overlay.content(), "starting");
    }

    #[test]
    fn test_copy_falls_back_and_acknowledges() {
        let mut state = loaded();
        state.open_cell(Column::Message);
        let now = Instant::now();
        state.copy_overlay(&mut Sink(false), &mut Sink(true), now);
        assert_eq!(state.overlay.copy_label(now), COPIED_LABEL);
        assert_eq!(
            state.ui_state.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Info)
        );
    }

    #[test]
    fn test_copy_double_failure_is_inline_error() {
        let mut state = loaded();
        state.open_cell(Column::Message);
        state.copy_overlay(&mut Sink(false), &mut Sink(false), Instant::now());
        assert_eq!(
            state.ui_state.message.as_ref().map(|m| m.kind),
            Some(MessageKind::Error)
        );
        assert!(state.overlay.is_open());
    }

    #[test]
    fn test_backdrop_click_closes_overlay() {
        let mut state = loaded();
        state.open_cell(Column::Message);
        state.ui_state.hit_areas.overlay = Some(Rect::new(10, 5, 40, 10));
        state.ui_state.hit_areas.copy_button = Some(Rect::new(12, 14, 8, 1));

        assert!(state.click_action(20, 8).is_none());
        assert!(matches!(state.click_action(13, 14), Some(Action::CopyOverlay)));
        assert!(matches!(state.click_action(0, 0), Some(Action::CloseOverlay)));
    }

    #[test]
    fn test_click_on_table_cell() {
        let mut state = loaded();
        state.refresh_view();
        state.ui_state.hit_areas.table = Rect::new(0, 4, 80, 10);
        state.ui_state.hit_areas.first_row_y = 6;
        state.ui_state.hit_areas.columns = vec![
            (Column::LineNumber, Rect::new(1, 6, 5, 1)),
            (Column::Message, Rect::new(7, 6, 40, 1)),
        ];

        assert!(matches!(
            state.click_action(10, 7),
            Some(Action::OpenCellAt { row: 1, column: Column::Message })
        ));
        // past the last row
        assert!(state.click_action(10, 12).is_none());
        // header row
        assert!(state.click_action(10, 5).is_none());
    }

    #[test]
    fn test_upload_during_search_input_resets_input() {
        let mut state = loaded();
        state.start_search();
        state.search_input_char('z');
        assert_eq!(state.store.search_term(), "z");

        state.begin_upload(PathBuf::from("second.log"));
        state.finish_upload(Ok(response("log_2")));
        assert_eq!(state.store.search_term(), "");
        assert_eq!(state.ui_state.search_input, "");
        assert_eq!(state.ui_state.input_mode, InputMode::Normal);

        state.start_search();
        state.search_input_char('a');
        assert_eq!(state.store.search_term(), "a");
    }

    #[test]
    fn test_failed_health_check_is_inline_error() {
        let mut state = AppState::new("http://localhost:8000");
        state.finish_health(Ok("healthy".into()));
        assert!(state.ui_state.message.is_none());

        state.finish_health(Err("connection refused".into()));
        let message = state.ui_state.message.as_ref().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.contains("connection refused"));
    }

    #[test]
    fn test_export_filename_keeps_safe_characters() {
        let mut state = AppState::new("local");
        assert_eq!(state.export_filename("20240115_103000"), "tfscope_20240115_103000.html");

        state.begin_upload(PathBuf::from("a.log"));
        state.finish_upload(Ok(response("../../etc/log_7")));
        let name = state.export_filename("20240115_103000");
        assert_eq!(name, "etclog_7_20240115_103000.html");
        assert!(!name.contains('/'));

        state.begin_upload(PathBuf::from("b.log"));
        state.finish_upload(Ok(response("../..")));
        assert_eq!(state.export_filename("s"), "tfscope_s.html");
    }

    #[test]
    fn test_local_time_toggle_invalidates_cache() {
        let mut state = loaded();
        state.refresh_view();
        let options = state.render_options();
        state.toggle_local_time();
        assert_ne!(state.render_options(), options);
        assert!(state
            .ui_state
            .view_cache
            .needs_refresh(state.store.revision(), state.render_options()));
    }

    #[test]
    fn test_report_contains_view() {
        let mut state = loaded();
        state.set_filter(EntryFilter::Level(LogLevel::Error));
        let html = state.report_html("2024-01-15 10:30:00");
        assert!(html.contains("Error: timeout"));
        assert!(!html.contains("deprecated"));
    }
}
