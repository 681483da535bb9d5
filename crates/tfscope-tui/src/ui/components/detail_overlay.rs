use std::time::Instant;

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::AppState;
use crate::ui::{Layout, Theme};

/// Popup showing one field's full content with a copy control
pub struct DetailOverlayView;

impl DetailOverlayView {
    pub fn render(frame: &mut Frame, state: &mut AppState, now: Instant) {
        if !state.overlay.is_open() {
            state.ui_state.hit_areas.overlay = None;
            state.ui_state.hit_areas.copy_button = None;
            return;
        }

        let popup = Layout::centered(frame.area(), 80, 70);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::frame_active())
            .title(Span::styled(
                format!(" {} ", state.overlay.title()),
                Theme::heading(),
            ));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
        let footer = Rect::new(
            inner.x,
            inner.y + inner.height.saturating_sub(1),
            inner.width,
            inner.height.min(1),
        );

        // Literal text; nothing in the content is interpreted
        let rows = Paragraph::new(Text::raw(state.overlay.content()))
            .wrap(Wrap { trim: false })
            .line_count(body.width);
        state.overlay.set_viewport(rows, body.height);

        let content = Paragraph::new(Text::raw(state.overlay.content()))
            .style(Theme::body())
            .wrap(Wrap { trim: false })
            .scroll((state.overlay.scroll(), 0));
        frame.render_widget(content, body);

        let acknowledging = state.overlay.is_acknowledging(now);
        let button = format!("[y] {}", state.overlay.copy_label(now));
        let button_style = if acknowledging {
            Theme::copied()
        } else {
            Theme::emphasis()
        };
        let button_width = (button.width() as u16).min(footer.width);
        let footer_line = Line::from(vec![
            Span::styled(button, button_style),
            Span::styled("  [Esc] Close  [j/k] Scroll", Theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(footer_line), footer);

        state.ui_state.hit_areas.overlay = Some(popup);
        state.ui_state.hit_areas.copy_button =
            Some(Rect::new(footer.x, footer.y, button_width, footer.height));
    }
}
