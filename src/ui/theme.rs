//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Card fills, one per service, cycled by item index.
const CARD_COLORS: [Color; 8] = [
    Color::Rgb(99, 102, 241),
    Color::Rgb(236, 72, 153),
    Color::Rgb(20, 184, 166),
    Color::Rgb(245, 158, 11),
    Color::Rgb(59, 130, 246),
    Color::Rgb(239, 68, 68),
    Color::Rgb(139, 92, 246),
    Color::Rgb(34, 197, 94),
];

/// Below this opacity a card is drawn dimmed.
const DIM_OPACITY: f64 = 0.6;

/// Every style the widgets use.
pub struct Theme;

impl Theme {
    // ── stage ──────────────────────────────────────────────────
    pub fn card_color(index: usize) -> Color {
        CARD_COLORS[index % CARD_COLORS.len()]
    }

    /// Fill and border style for a card at `opacity`.
    pub fn card_style(index: usize, opacity: f64) -> Style {
        let style = Style::default()
            .bg(Self::card_color(index))
            .fg(Color::White);
        if opacity < DIM_OPACITY {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub fn card_title_style() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn active_card_border() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_subtitle_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── panel ──────────────────────────────────────────────────
    pub fn panel_style() -> Style {
        Style::default().bg(Color::Rgb(17, 24, 39)).fg(Color::White)
    }

    pub fn panel_title_style(index: usize) -> Style {
        Style::default()
            .fg(Self::card_color(index))
            .add_modifier(Modifier::BOLD)
    }

    pub fn feature_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn indicator_track_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn indicator_fill_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
