//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::anim::Timeline;
use crate::core::showcase::{Effect, Showcase, ShowcaseEvent};
use crate::ui::layout::AppLayout;

/// Top-level application state.
pub struct AppState {
    /// The grid/stack state machine.
    pub showcase: Showcase,
    /// Every animated property, ticked once per frame.
    pub timeline: Timeline,
    /// Keybindings and input/render tuning.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Last known terminal size, used to map mouse positions.
    pub terminal_area: Rect,
    /// `true` between a left-button press and its release on the stage.
    pub dragging: bool,
    started: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            showcase: Showcase::new(config.input()),
            timeline: Timeline::new(),
            config,
            should_quit: false,
            terminal_area: Rect::default(),
            dragging: false,
            started: Instant::now(),
        }
    }

    /// Milliseconds since startup; the touch gate's clock.
    pub fn clock_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Feed one showcase event through the state machine and onto the
    /// timeline.
    pub fn dispatch(&mut self, event: ShowcaseEvent) -> Vec<Effect> {
        let effects = self.showcase.dispatch(event, &mut self.timeline);
        if !effects.is_empty() {
            tracing::trace!(?event, ?effects, scalar = self.showcase.scalar(), "dispatched");
        }
        effects
    }

    /// Track a new terminal size and resize the stage accordingly.
    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        let stage = AppLayout::from_area(area).stage_area;
        self.dispatch(ShowcaseEvent::Resize {
            width: f64::from(stage.width) * self.config.cell_width,
            height: f64::from(stage.height) * self.config.cell_height,
        });
    }

    /// Advance animations by `dt` seconds and route completions back into
    /// the showcase.
    pub fn advance(&mut self, dt: f64) {
        let completed = self.timeline.advance(dt);
        if !completed.is_empty() {
            self.showcase.on_completed(&completed, &mut self.timeline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::Mode;

    fn state_with_area(width: u16, height: u16) -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.resize(Rect::new(0, 0, width, height));
        state
    }

    #[test]
    fn resize_maps_cells_to_units() {
        let state = state_with_area(150, 51);
        let layout = state.showcase.layout().unwrap();
        // One row goes to the status bar.
        assert_eq!(layout.viewport.width(), 1200.0);
        assert_eq!(layout.viewport.height(), 800.0);
        assert!(state.timeline.item_frame(7).is_some());
    }

    #[test]
    fn transition_settles_through_advance() {
        let mut state = state_with_area(150, 51);
        state.dispatch(ShowcaseEvent::JumpTo(3));
        assert_eq!(state.showcase.mode(), Mode::Stacked);
        assert!(state.showcase.transition_in_flight());

        for _ in 0..200 {
            state.advance(1.0 / 60.0);
        }
        assert!(!state.showcase.transition_in_flight());
        let top = state.timeline.frames_in_paint_order(8);
        assert_eq!(top.last().map(|f| f.index), Some(3));
    }
}
