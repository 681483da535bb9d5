use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{MessageKind, StatusMessage};
use crate::ui::Theme;

/// Key hints shown while no message is pending
pub const VIEWER_HINTS: &[(&str, &str)] = &[
    ("0-6", "Filter"),
    ("/", "Search"),
    ("Enter", "Message"),
    ("t/r", "Timestamp/Req"),
    ("u", "Upload"),
    ("e", "Export"),
    ("?", "Help"),
    ("q", "Quit"),
];

/// Bottom line: an inline message if one is pending, key hints otherwise
pub struct StatusBar<'a> {
    hints: &'a [(&'a str, &'a str)],
    message: Option<&'a StatusMessage>,
    right: String,
}

impl<'a> StatusBar<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            hints,
            message: None,
            right: String::new(),
        }
    }

    pub fn message(mut self, message: Option<&'a StatusMessage>) -> Self {
        self.message = message;
        self
    }

    /// Text pinned to the right edge
    pub fn right(mut self, text: impl Into<String>) -> Self {
        self.right = text.into();
        self
    }

    fn left_line(&self) -> Line<'a> {
        if let Some(message) = self.message {
            let marker = match message.kind {
                MessageKind::Info => "● ",
                MessageKind::Error => "✖ ",
            };
            return Line::from(vec![
                Span::styled(marker, Theme::notice(message.kind)),
                Span::styled(message.text.as_str(), Theme::notice(message.kind)),
                Span::styled("  [x] dismiss", Theme::status_line()),
            ]);
        }

        let spans = self.hints.iter().enumerate().flat_map(|(i, &(key, what))| {
            let sep = if i == 0 { "" } else { " · " };
            [
                Span::styled(sep, Theme::status_line()),
                Span::styled(key, Theme::status_key()),
                Span::styled(format!(" {what}"), Theme::status_line()),
            ]
        });
        Line::from(spans.collect::<Vec<_>>())
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::status_line());

        let right_width = u16::try_from(self.right.width() + 1).unwrap_or(u16::MAX);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        Paragraph::new(self.left_line()).render(left_area.inner(Margin::new(1, 0)), buf);
        Paragraph::new(Span::styled(self.right, Theme::status_line())).render(right_area, buf);
    }
}
