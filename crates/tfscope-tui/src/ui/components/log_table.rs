use ratatui::{
    layout::{Alignment, Constraint, Flex, Margin, Rect},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};
use tfscope_logs::{truncate_raw, CellView, Column, RowView, NO_DATA};

use crate::app::AppState;
use crate::ui::{Layout, Theme};

/// Width of each column, in `Column::ALL` order
pub const COLUMN_WIDTHS: [Constraint; 7] = [
    Constraint::Length(6),  // #
    Constraint::Length(12), // Timestamp
    Constraint::Length(7),  // Level
    Constraint::Length(20), // Resource
    Constraint::Length(8),  // Section
    Constraint::Min(20),    // Message
    Constraint::Length(16), // Request ID
];

const COLUMN_SPACING: u16 = 1;

/// Raw message of the selected row, shown under the table
const TOOLTIP_MAX_LEN: usize = 200;

/// Terminal rendering of the projected log table
pub struct LogTable;

impl LogTable {
    pub fn render(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let total = state.store.len();
        let visible = state.visible_len();

        let title = if state.store.active_filter().label() != "All"
            || !state.store.search_term().trim().is_empty()
        {
            format!(" Logs ({} of {}) ", visible, total)
        } else {
            format!(" Logs ({}) ", total)
        };

        let tooltip = state
            .selected_row()
            .and_then(|row| row.tooltip.as_deref())
            .map(|raw| truncate_raw(Some(raw), TOOLTIP_MAX_LEN).into_owned());

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::frame())
            .title(Span::styled(title, Theme::heading()));
        if let Some(tooltip) = tooltip {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", tooltip),
                Theme::muted(),
            )));
        }

        let inner = block.inner(area);
        let first_row_y = inner.y.saturating_add(1);
        let body_height = usize::from(inner.height.saturating_sub(1));

        state.follow_selection(body_height);
        let scroll = state.ui_state.scroll;
        let selected = state.ui_state.selected;

        // Hit areas for mouse clicks
        let header_row = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
        let columns = Layout::table_columns(header_row, &COLUMN_WIDTHS, COLUMN_SPACING);
        state.ui_state.hit_areas.table = inner;
        state.ui_state.hit_areas.first_row_y = first_row_y;
        state.ui_state.hit_areas.columns = Column::ALL.iter().copied().zip(columns).collect();

        let header = Row::new(Column::ALL.iter().map(|c| Cell::from(c.header())))
            .style(Theme::column_header());

        let view = state.refresh_view();
        let rows: Vec<Row> = view
            .rows()
            .iter()
            .enumerate()
            .skip(scroll)
            .take(body_height)
            .map(|(i, row)| {
                let row_widget = Self::row(row);
                if i == selected {
                    row_widget.style(Theme::selection())
                } else {
                    row_widget
                }
            })
            .collect();
        let is_empty = view.is_empty();

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .highlight_spacing(HighlightSpacing::Never)
            .block(block);

        frame.render_widget(table, area);

        if is_empty && body_height > 0 {
            let placeholder = Rect::new(inner.x, first_row_y, inner.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(NO_DATA, Theme::muted()))
                    .alignment(Alignment::Center),
                placeholder,
            );
        }

        if visible > body_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let max_scroll = visible.saturating_sub(body_height);
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max_scroll)
                .position(scroll.min(max_scroll));

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    fn row(row: &RowView) -> Row<'static> {
        Row::new(vec![
            Cell::from(Span::styled(row.line_number.to_string(), Theme::muted())),
            Self::cell(&row.timestamp),
            Cell::from(Span::styled(row.level.label.clone(), Theme::level_chip(&row.level.level))),
            Self::cell(&row.resource_type),
            Self::cell(&row.section),
            Self::cell(&row.message),
            Self::cell(&row.request_id),
        ])
    }

    fn cell(cell: &CellView) -> Cell<'static> {
        let style = if cell.target.is_some() {
            Theme::link()
        } else {
            Theme::body()
        };
        // single line; the full value is in the overlay
        let display = cell.display.replace(['\n', '\r'], " ");
        Cell::from(Span::styled(display, style))
    }
}
