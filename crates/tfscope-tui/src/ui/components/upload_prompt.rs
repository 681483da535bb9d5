use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::ui::{Layout, Theme};

/// Path prompt for uploading a log file
pub struct UploadPrompt;

impl UploadPrompt {
    pub fn render(frame: &mut Frame, state: &AppState) {
        let popup = Layout::centered_fixed(frame.area(), 70, 5);
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::from(vec![
                Span::styled("Path: ", Theme::muted()),
                Span::styled(state.ui_state.upload_input.as_str(), Theme::emphasis()),
                Span::styled(
                    "█",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Upload  [Esc] Cancel  [Ctrl+u] Clear",
                Theme::muted(),
            )),
        ];

        let prompt = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::frame_active())
                .title(Span::styled(
                    format!(" Upload log file ({}) ", state.backend_name),
                    Theme::heading(),
                )),
        );

        frame.render_widget(prompt, popup);
    }
}
