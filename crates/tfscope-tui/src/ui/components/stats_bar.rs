use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tfscope_logs::{LevelCounts, LogStore};

use crate::ui::Theme;

/// Summary statistics of the loaded upload
pub struct StatsBar;

impl StatsBar {
    pub fn render(frame: &mut Frame, area: Rect, store: &LogStore) {
        let summary = store.summary();
        let counts = LevelCounts::from_entries(store.entries());

        let label = |text: &'static str, color: Color| {
            Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };

        let mut spans = vec![
            Span::styled(" ", Theme::body()),
            Span::styled("Lines:", Theme::muted()),
            Span::styled(format!("{} ", summary.total_lines.max(store.len() as u64)), Theme::body()),
            Span::styled("│ ", Theme::muted()),
            label("ERR:", Color::Red),
            Span::styled(format!("{} ", summary.errors().max(counts.error as u64)), Theme::body()),
            label("WRN:", Color::Yellow),
            Span::styled(
                format!("{} ", summary.warnings().max(counts.warning as u64)),
                Theme::body(),
            ),
            label("INF:", Color::Green),
            Span::styled(format!("{} ", counts.info), Theme::body()),
            label("DBG:", Color::Cyan),
            Span::styled(format!("{} ", counts.debug), Theme::body()),
        ];

        if counts.trace > 0 {
            spans.push(label("TRC:", Color::DarkGray));
            spans.push(Span::styled(format!("{} ", counts.trace), Theme::body()));
        }
        if counts.other > 0 {
            spans.push(label("OTH:", Color::Gray));
            spans.push(Span::styled(format!("{} ", counts.other), Theme::body()));
        }

        spans.push(Span::styled("│ ", Theme::muted()));
        spans.push(Span::styled("Requests:", Theme::muted()));
        spans.push(Span::styled(format!("{} ", summary.unique_requests), Theme::body()));
        if !summary.section_counts.is_empty() {
            let sections = summary
                .section_counts
                .iter()
                .map(|(name, n)| format!("{name}={n}"))
                .collect::<Vec<_>>()
                .join(" ");
            spans.push(Span::styled("│ ", Theme::muted()));
            spans.push(Span::styled(sections, Theme::body()));
        }

        let stats_widget = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::frame())
                .title(Span::styled(" Stats ", Theme::heading())),
        );

        frame.render_widget(stats_widget, area);
    }
}
