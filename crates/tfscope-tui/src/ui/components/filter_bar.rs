use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tfscope_logs::EntryFilter;
use unicode_width::UnicodeWidthStr;

use crate::app::{AppState, InputMode};
use crate::ui::Theme;

/// Filter buttons plus the search field
pub struct FilterBar;

impl FilterBar {
    pub fn render(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let searching = state.ui_state.input_mode == InputMode::Search;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if searching {
                Theme::frame_active()
            } else {
                Theme::frame()
            })
            .title(Span::styled(" Filter ", Theme::heading()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let active = state.store.active_filter().clone();
        let mut spans = Vec::new();
        let mut buttons = Vec::new();
        let mut x = inner.x;

        for (key, filter) in ('0'..='6').zip(EntryFilter::buttons()) {
            let label = format!(" {} {} ", key, filter.label());
            let width = label.width() as u16;
            let style = Theme::toggle(filter == active);
            buttons.push((filter, Rect::new(x, inner.y, width, 1)));
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x = x.saturating_add(width + 1);
        }

        spans.push(Span::styled("│ ", Theme::muted()));
        if searching {
            spans.push(Span::styled(
                "/",
                Theme::emphasis(),
            ));
            spans.push(Span::styled(
                state.ui_state.search_input.clone(),
                Theme::emphasis(),
            ));
            spans.push(Span::styled(
                "█",
                Theme::emphasis().add_modifier(Modifier::SLOW_BLINK),
            ));
            spans.push(Span::styled("  [Enter] Keep  [Esc] Clear", Theme::muted()));
        } else if !state.store.search_term().is_empty() {
            spans.push(Span::styled("Search: ", Theme::muted()));
            spans.push(Span::styled(
                state.store.search_term().to_string(),
                Theme::emphasis(),
            ));
            spans.push(Span::styled("  [n] Clear  [/] Edit", Theme::muted()));
        } else {
            spans.push(Span::styled("[/] Search", Theme::muted()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);

        // Buttons cut off by a narrow terminal are not clickable
        let right = inner.x.saturating_add(inner.width);
        buttons.retain(|(_, r)| r.x + r.width <= right);
        state.ui_state.hit_areas.filter_buttons = buttons;
    }
}
