use ratatui::style::{Color, Modifier, Style};
use tfscope_logs::LogLevel;

use crate::app::MessageKind;

/// Terraform purple, used for headings and active controls
const ACCENT: Color = Color::Rgb(0x84, 0x4F, 0xBA);
const ACCENT_SOFT: Color = Color::Rgb(0x3B, 0x2A, 0x55);
const INK: Color = Color::Rgb(0xE6, 0xE6, 0xEB);
const MUTED: Color = Color::DarkGray;
const CHROME_BG: Color = Color::Rgb(0x22, 0x22, 0x2A);
const GOLD: Color = Color::Yellow;

/// Styles for every widget in the viewer
pub struct Theme;

impl Theme {
    pub fn frame() -> Style {
        Style::new().fg(MUTED)
    }

    /// Border of whichever input currently has focus
    pub fn frame_active() -> Style {
        Style::new().fg(ACCENT)
    }

    pub fn heading() -> Style {
        Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn body() -> Style {
        Style::new().fg(INK)
    }

    pub fn muted() -> Style {
        Style::new().fg(MUTED)
    }

    pub fn emphasis() -> Style {
        Style::new().fg(GOLD).add_modifier(Modifier::BOLD)
    }

    /// Cells that open the detail overlay
    pub fn link() -> Style {
        Style::new().fg(INK).add_modifier(Modifier::UNDERLINED)
    }

    /// Level badge drawn as a coloured chip; unknown levels stay neutral
    pub fn level_chip(level: &LogLevel) -> Style {
        let style = Style::new().fg(level.color()).add_modifier(Modifier::BOLD);
        match level {
            LogLevel::Error => style.add_modifier(Modifier::REVERSED),
            LogLevel::Other(_) => Style::new().fg(INK),
            _ => style,
        }
    }

    pub fn column_header() -> Style {
        Style::new()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn selection() -> Style {
        Style::new().bg(ACCENT_SOFT).add_modifier(Modifier::BOLD)
    }

    /// Filter button, highlighted when it is the active one
    pub fn toggle(active: bool) -> Style {
        if active {
            Style::new()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(INK)
        }
    }

    /// Copy control while the acknowledgment is showing
    pub fn copied() -> Style {
        Style::new()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_line() -> Style {
        Style::new().fg(MUTED).bg(CHROME_BG)
    }

    pub fn status_key() -> Style {
        Style::new()
            .fg(GOLD)
            .bg(CHROME_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn notice(kind: MessageKind) -> Style {
        let fg = match kind {
            MessageKind::Info => Color::Green,
            MessageKind::Error => Color::Red,
        };
        Style::new().fg(fg).bg(CHROME_BG).add_modifier(Modifier::BOLD)
    }
}
