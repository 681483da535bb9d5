use ratatui::layout::{Constraint, Direction, Flex, Layout as RatatuiLayout, Rect};

/// Regions of the log viewer screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerAreas {
    pub header: Rect,
    pub stats: Option<Rect>,
    pub filter: Rect,
    pub table: Rect,
    pub status: Rect,
}

/// Layout helper for consistent screen layouts
pub struct Layout;

impl Layout {
    /// Header, optional stats bar, filter bar, table and status bar
    pub fn log_viewer(area: Rect, show_stats: bool) -> ViewerAreas {
        let mut constraints = vec![Constraint::Length(3)]; // Header
        if show_stats {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(3)); // Filter bar
        constraints.push(Constraint::Min(3)); // Table
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        let mut next = || {
            let rect = chunks[idx];
            idx += 1;
            rect
        };

        let header = next();
        let stats = show_stats.then(&mut next);
        let filter = next();
        let table = next();
        let status = next();

        ViewerAreas {
            header,
            stats,
            filter,
            table,
            status,
        }
    }

    /// A popup centered in `area`, sized in percent
    pub fn centered(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
        let [popup] = RatatuiLayout::horizontal([Constraint::Percentage(width_percent)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = RatatuiLayout::vertical([Constraint::Percentage(height_percent)])
            .flex(Flex::Center)
            .areas(popup);
        popup
    }

    /// A popup of fixed size centered in `area`, clamped to fit
    pub fn centered_fixed(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }

    /// Split a table row into column cells, the way `Table` lays them out
    pub fn table_columns(row: Rect, widths: &[Constraint], spacing: u16) -> Vec<Rect> {
        RatatuiLayout::horizontal(widths.iter().copied())
            .flex(Flex::Start)
            .spacing(spacing)
            .split(row)
            .to_vec()
    }
}
