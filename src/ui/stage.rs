//! The stage: page header plus the eight cards, drawn from the timeline's
//! current frame values.
//!
//! Card geometry arrives in layout units; each card is mapped to terminal
//! cells through the configured cell size and clipped to the stage.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::content::{HEADER_SUBTITLE, HEADER_TITLE, SERVICES};
use crate::core::anim::ItemFrame;
use crate::core::layout::HEADER_OFFSET;

use super::theme::Theme;

/// Cards with opacity at or below this are not drawn at all.
const INVISIBLE_OPACITY: f64 = 0.01;

/// Terminal rows covering the header offset.
pub fn header_rows(cell_height: f64) -> u16 {
    (HEADER_OFFSET / cell_height).ceil().clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Map a card's unit-space box onto terminal cells inside `area`.
/// Returns `None` when nothing of it is visible.
pub fn card_rect(frame: &ItemFrame, area: Rect, cell_width: f64, cell_height: f64) -> Option<Rect> {
    let x0 = (frame.x / cell_width).round();
    let y0 = (frame.y / cell_height).round();
    let x1 = ((frame.x + frame.width) / cell_width).round();
    let y1 = ((frame.y + frame.height) / cell_height).round();

    let left = x0.max(0.0);
    let top = y0.max(0.0);
    let right = x1.min(f64::from(area.width));
    let bottom = y1.min(f64::from(area.height));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

// ───────────────────────────────────────── header ────────────

pub struct Header;

impl Widget for Header {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let pad = area.height.saturating_sub(2) / 2;
        let mut lines: Vec<Line> = (0..pad).map(|_| Line::default()).collect();
        lines.push(Line::from(Span::styled(HEADER_TITLE, Theme::header_title_style())));
        lines.push(Line::from(Span::styled(
            HEADER_SUBTITLE,
            Theme::header_subtitle_style(),
        )));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ───────────────────────────────────────── cards ─────────────

/// Draws item frames in the order given (callers pass paint order).
pub struct StageWidget<'a> {
    frames: &'a [ItemFrame],
    cell_width: f64,
    cell_height: f64,
    /// Index of the card shown on top of the stack, if any.
    active: Option<usize>,
}

impl<'a> StageWidget<'a> {
    pub fn new(frames: &'a [ItemFrame], cell_width: f64, cell_height: f64) -> Self {
        Self {
            frames,
            cell_width,
            cell_height,
            active: None,
        }
    }

    pub fn active(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }
}

impl Widget for StageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for frame in self.frames {
            if frame.opacity <= INVISIBLE_OPACITY {
                continue;
            }
            let Some(rect) = card_rect(frame, area, self.cell_width, self.cell_height) else {
                continue;
            };
            render_card(frame, rect, self.active == Some(frame.index), buf);
        }
    }
}

fn render_card(frame: &ItemFrame, rect: Rect, active: bool, buf: &mut Buffer) {
    Clear.render(rect, buf);
    let style = Theme::card_style(frame.index, frame.opacity);

    // Too small for a border: a plain block of colour.
    if rect.width < 4 || rect.height < 3 {
        Block::default().style(style).render(rect, buf);
        return;
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(style);
    if active {
        block = block
            .border_type(BorderType::Thick)
            .border_style(Theme::active_card_border());
    }
    let inner = block.inner(rect);
    block.render(rect, buf);

    let title = SERVICES
        .get(frame.index)
        .map(|s| s.title)
        .unwrap_or_default();
    let pad = inner.height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::default()).collect();
    lines.push(Line::from(format!("{:02}", frame.index + 1)));
    lines.push(Line::from(Span::styled(title, Theme::card_title_style())));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    fn frame(index: usize, x: f64, y: f64, size: f64, opacity: f64) -> ItemFrame {
        ItemFrame {
            index,
            x,
            y,
            width: size,
            height: size,
            rotation: 0.0,
            opacity,
            stacking_order: 1,
        }
    }

    #[test]
    fn header_rows_round_up() {
        assert_eq!(header_rows(16.0), 8);
        assert_eq!(header_rows(20.0), 6);
    }

    #[test]
    fn card_rect_maps_units_to_cells() {
        let area = Rect::new(0, 0, 100, 40);
        let r = card_rect(&frame(0, 80.0, 160.0, 160.0, 1.0), area, 8.0, 16.0).unwrap();
        assert_eq!(r, Rect::new(10, 10, 20, 10));
    }

    #[test]
    fn card_rect_clips_to_area() {
        let area = Rect::new(2, 1, 20, 10);
        let r = card_rect(&frame(0, -80.0, 96.0, 240.0, 1.0), area, 8.0, 16.0).unwrap();
        assert_eq!(r, Rect::new(2, 7, 20, 4));
        assert!(card_rect(&frame(0, 400.0, 0.0, 80.0, 1.0), area, 8.0, 16.0).is_none());
    }

    #[test]
    fn later_frames_paint_over_earlier_ones() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        let frames = [
            frame(0, 0.0, 0.0, 160.0, 1.0),
            frame(1, 80.0, 80.0, 160.0, 1.0),
        ];
        StageWidget::new(&frames, 8.0, 16.0).render(area, &mut buf);
        // (12, 6) is covered by both; card 1 was painted last.
        assert_eq!(buf[(12u16, 6u16)].bg, Theme::card_color(1));
        assert_eq!(buf[(2u16, 2u16)].bg, Theme::card_color(0));
    }

    #[test]
    fn transparent_cards_are_skipped() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        let frames = [frame(3, 0.0, 0.0, 160.0, 0.0)];
        StageWidget::new(&frames, 8.0, 16.0).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
