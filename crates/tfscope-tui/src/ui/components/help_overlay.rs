use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::{Layout, Theme};

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const SECTIONS: &[Section] = &[
    (
        "Navigation",
        &[
            ("j/k", "Next / previous row"),
            ("Ctrl+d/u", "Page down / up"),
            ("g/G", "First / last row"),
            ("click", "Open a cell"),
        ],
    ),
    (
        "Filter",
        &[
            ("0", "All levels"),
            ("1-5", "Trace Debug Info Warning Error"),
            ("6", "Entries with a resource"),
            ("/", "Search while typing"),
            ("n", "Clear search"),
        ],
    ),
    (
        "Details",
        &[
            ("Enter/m", "Full message"),
            ("t", "Full timestamp"),
            ("r", "Full request id"),
            ("y", "Copy overlay content"),
            ("d", "Upload details"),
        ],
    ),
    (
        "Actions",
        &[
            ("u", "Upload a log file"),
            ("e", "Export view as HTML"),
            ("s", "Toggle stats bar"),
            ("T", "UTC / local time"),
            ("x", "Dismiss message"),
            ("q", "Quit"),
        ],
    ),
];

/// Key listing drawn over the viewer
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let lines = Self::lines();
        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let popup = Layout::centered_fixed(frame.area(), 52, height);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::frame_active())
                    .title(Span::styled(" Keys ", Theme::heading()))
                    .title_bottom(Line::from(Span::styled(" ? or Esc to close ", Theme::muted()))),
            ),
            popup,
        );
    }

    fn lines() -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, (name, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(*name, Theme::emphasis())));
            lines.extend(keys.iter().map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!("{key:>10}  "), Theme::heading()),
                    Span::styled(*what, Theme::body()),
                ])
            }));
        }
        lines
    }
}
