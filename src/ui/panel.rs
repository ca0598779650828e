//! Services panel — one page per service, scrolled by the animated panel
//! offset.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::content::{Service, SERVICES};

use super::theme::Theme;

/// Renders the stacked service pages.  `offset` and `page_height` are in
/// layout units; the visible page is `-offset / page_height`.
pub struct ServicePanel {
    offset: f64,
    page_height: f64,
}

impl ServicePanel {
    pub fn new(offset: f64, page_height: f64) -> Self {
        Self {
            offset,
            page_height,
        }
    }

    /// First visible row of the page strip for a panel `rows` tall.
    fn scroll_rows(&self, rows: u16) -> u16 {
        if self.page_height <= 0.0 || rows == 0 {
            return 0;
        }
        let max = f64::from(rows) * (SERVICES.len() - 1) as f64;
        let pages = -self.offset / self.page_height;
        (pages * f64::from(rows)).round().clamp(0.0, max) as u16
    }
}

impl Widget for ServicePanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.area() == 0 {
            return;
        }
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Theme::indicator_track_style())
            .style(Theme::panel_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.area() == 0 {
            return;
        }

        // Every page is padded to exactly one panel height so a whole-page
        // scroll lands on a page boundary.
        let width = usize::from(inner.width.saturating_sub(2)).max(1);
        let rows = usize::from(inner.height);
        let mut lines = Vec::with_capacity(rows * SERVICES.len());
        for (index, service) in SERVICES.iter().enumerate() {
            let mut page = page_lines(index, service, width);
            page.resize(rows, Line::default());
            lines.extend(page);
        }

        let text_area = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(1),
            ..inner
        };
        Paragraph::new(lines)
            .scroll((self.scroll_rows(inner.height), 0))
            .render(text_area, buf);
    }
}

fn page_lines(index: usize, service: &Service, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(service.title, Theme::panel_title_style(index))),
        Line::default(),
    ];
    lines.extend(wrap(service.description, width).into_iter().map(Line::from));
    lines.push(Line::default());
    for feature in service.features {
        for (i, row) in wrap(feature, width.saturating_sub(2).max(1)).into_iter().enumerate() {
            let bullet = if i == 0 { "• " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{bullet}{row}"),
                Theme::feature_style(),
            )));
        }
    }
    lines
}

/// Greedy word wrap to `width` characters.  Words longer than a line are
/// split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        loop {
            let used = line.chars().count();
            let need = word.chars().count() + usize::from(used > 0);
            if used + need <= width {
                if used > 0 {
                    line.push(' ');
                }
                line.push_str(&word);
                break;
            }
            if used > 0 {
                out.push(std::mem::take(&mut line));
                continue;
            }
            // Word alone is too long.
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            out.push(head);
            if word.is_empty() {
                break;
            }
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}
