//! Vertical scroll-progress bar on the right edge of the stage.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;

pub struct ProgressIndicator {
    percent: f64,
}

impl ProgressIndicator {
    pub fn new(percent: f64) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
        }
    }

    /// Filled rows (from the top) for a bar `height` rows tall.
    fn filled(&self, height: u16) -> u16 {
        (self.percent / 100.0 * f64::from(height)).round() as u16
    }
}

impl Widget for ProgressIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let filled = self.filled(area.height);
        for (i, y) in (area.top()..area.bottom()).enumerate() {
            for x in area.left()..area.right() {
                let (symbol, style) = if (i as u16) < filled {
                    ("┃", Theme::indicator_fill_style())
                } else {
                    ("│", Theme::indicator_track_style())
                };
                buf[(x, y)].set_symbol(symbol).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_proportional() {
        let area = Rect::new(0, 0, 1, 10);
        let mut buf = Buffer::empty(area);
        ProgressIndicator::new(50.0).render(area, &mut buf);
        assert_eq!(buf[(0u16, 4u16)].symbol(), "┃");
        assert_eq!(buf[(0u16, 5u16)].symbol(), "│");
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(ProgressIndicator::new(250.0).filled(8), 8);
        assert_eq!(ProgressIndicator::new(-5.0).filled(8), 0);
    }
}
