//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::layout::LayoutProfile;

/// Primary screen layout: the stage, the progress indicator overlaid on its
/// right edge, and a bottom status bar.
pub struct AppLayout {
    pub stage_area: Rect,
    pub indicator_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // stage (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let stage_area = chunks[0];

        let indicator_area = Rect {
            x: stage_area.right().saturating_sub(1),
            width: stage_area.width.min(1),
            ..stage_area
        };

        Self {
            stage_area,
            indicator_area,
            status_area: chunks[1],
        }
    }

    /// Rows at the top of the stage reserved for the page header.
    pub fn header_area(&self, header_rows: u16) -> Rect {
        Rect {
            height: header_rows.min(self.stage_area.height),
            ..self.stage_area
        }
    }

    /// Where the services panel is drawn while stacked: the right half of
    /// the content region on wide viewports, its lower part on narrow ones.
    /// Never overlaps the indicator column.
    pub fn panel_area(&self, profile: LayoutProfile, header_rows: u16) -> Rect {
        let stage = self.stage_area;
        let top = stage.y + header_rows.min(stage.height);
        let width = stage.width.saturating_sub(self.indicator_area.width);
        let height = stage.bottom().saturating_sub(top);

        match profile {
            LayoutProfile::Desktop => {
                let half = width / 2;
                Rect::new(stage.x + half, top, width - half, height)
            }
            LayoutProfile::Mobile => {
                let panel_h = height * 2 / 5;
                Rect::new(stage.x, top + (height - panel_h), width, panel_h)
            }
        }
    }
}

/// Whether terminal cell `(column, row)` lies inside `rect`.
pub fn point_in_rect(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_partition_the_screen() {
        let l = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(l.stage_area, Rect::new(0, 0, 120, 39));
        assert_eq!(l.status_area, Rect::new(0, 39, 120, 1));
        assert_eq!(l.indicator_area, Rect::new(119, 0, 1, 39));
        assert_eq!(l.header_area(8), Rect::new(0, 0, 120, 8));
    }

    #[test]
    fn panel_placement_follows_profile() {
        let l = AppLayout::from_area(Rect::new(0, 0, 121, 41));
        assert_eq!(
            l.panel_area(LayoutProfile::Desktop, 8),
            Rect::new(60, 8, 60, 32)
        );
        let mobile = l.panel_area(LayoutProfile::Mobile, 8);
        assert_eq!(mobile.bottom(), 40);
        assert_eq!(mobile.width, 120);
        assert!(!point_in_rect(mobile, 120, 39));
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let l = AppLayout::from_area(Rect::new(0, 0, 1, 1));
        let p = l.panel_area(LayoutProfile::Mobile, 8);
        assert_eq!(p.area(), 0);
    }
}
