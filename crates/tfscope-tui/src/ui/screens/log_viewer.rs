use std::time::Instant;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{AppState, InputMode};
use crate::ui::components::{
    DetailOverlayView, FilterBar, HelpOverlay, LogTable, StatsBar, StatusBar, UploadPrompt,
    VIEWER_HINTS,
};
use crate::ui::{Layout, Theme};

/// Log viewer screen
pub struct LogViewerScreen;

impl LogViewerScreen {
    /// Draw the whole frame; overlays go on top in a fixed order
    pub fn render(frame: &mut Frame, state: &mut AppState, now: Instant) {
        let areas = Layout::log_viewer(frame.area(), state.ui_state.stats_visible);

        Self::render_header(frame, areas.header, state);
        if let Some(stats) = areas.stats {
            StatsBar::render(frame, stats, &state.store);
        }
        FilterBar::render(frame, areas.filter, state);
        LogTable::render(frame, areas.table, state);
        Self::render_status_bar(frame, areas.status, state);

        if state.ui_state.input_mode == InputMode::Upload {
            UploadPrompt::render(frame, state);
        }
        DetailOverlayView::render(frame, state, now);
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let file = state
            .source_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "no file".to_string());
        let log_id = state.store.log_id().unwrap_or("-");

        let mut spans = vec![
            Span::styled("tfscope", Theme::heading()),
            Span::styled(" │ ", Theme::muted()),
            Span::styled(state.backend_name.as_str(), Theme::body()),
            Span::styled(" │ ", Theme::muted()),
            Span::styled(file, Theme::emphasis()),
            Span::styled(" │ ", Theme::muted()),
            Span::styled(log_id, Theme::body()),
            Span::styled(" │ ", Theme::muted()),
            Span::styled(format!("⏱ {}", state.ui_state.zone.label()), Theme::muted()),
        ];

        if let Some(frame_char) = state.spinner() {
            let what = if state.upload_in_flight {
                "Uploading"
            } else {
                "Fetching details"
            };
            spans.push(Span::styled(" │ ", Theme::muted()));
            spans.push(Span::styled(
                format!("{} {}...", frame_char, what),
                Theme::emphasis(),
            ));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::frame()),
        );

        frame.render_widget(header, area);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let right = format!(
            "{} │ row {}",
            state.store.active_filter().label(),
            if state.store.is_empty() {
                0
            } else {
                state.ui_state.selected + 1
            }
        );
        let bar = StatusBar::new(VIEWER_HINTS)
            .message(state.ui_state.message.as_ref())
            .right(right);
        frame.render_widget(bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tfscope_logs::{Column, LogEntry, LogLevel, UploadResponse};

    fn screen_text(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal
            .draw(|frame| LogViewerScreen::render(frame, state, Instant::now()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_full_screen_with_overlay() {
        let mut state = AppState::new("local");
        state.begin_upload("plan.log".into());
        state.finish_upload(Ok(UploadResponse {
            log_id: "log_1".into(),
            logs: vec![LogEntry::new(1, LogLevel::Error, "Error: <timeout>")],
            ..Default::default()
        }));
        state.open_cell(Column::Message);

        let text = screen_text(&mut state);
        assert!(text.contains("tfscope"));
        assert!(text.contains("plan.log"));
        assert!(text.contains(" Message "));
        assert!(text.contains("Error: <timeout>"));
    }

    #[test]
    fn test_spinner_while_uploading() {
        let mut state = AppState::new("http://localhost:8000");
        state.begin_upload("plan.log".into());
        let text = screen_text(&mut state);
        assert!(text.contains("Uploading..."));
        assert!(text.contains("No data available"));
    }
}
