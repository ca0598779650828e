//! Input handling — maps key/mouse events to showcase events.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::showcase::ShowcaseEvent;
use crate::ui::layout::{point_in_rect, AppLayout};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Digits jump straight to an item.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            let index = c as usize - '1' as usize;
            if index < state.showcase.item_count() {
                state.dispatch(ShowcaseEvent::JumpTo(index));
            }
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let notch = state.config.wheel_notch;
    match action {
        Action::Quit => state.should_quit = true,
        // Negative wheel delta advances the scalar.
        Action::ScrollDown => {
            state.dispatch(ShowcaseEvent::Wheel { delta_y: -notch });
        }
        Action::ScrollUp => {
            state.dispatch(ShowcaseEvent::Wheel { delta_y: notch });
        }
        Action::NextItem => {
            let next = match state.showcase.active_index() {
                Some(i) => i + 1,
                None => 0,
            };
            if next < state.showcase.item_count() {
                state.dispatch(ShowcaseEvent::JumpTo(next));
            }
        }
        Action::PrevItem => match state.showcase.active_index() {
            Some(0) | None => {
                state.dispatch(ShowcaseEvent::Reset);
            }
            Some(i) => {
                state.dispatch(ShowcaseEvent::JumpTo(i - 1));
            }
        },
        Action::Reset => {
            state.dispatch(ShowcaseEvent::Reset);
        }
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(state.terminal_area);
    let notch = state.config.wheel_notch;

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            state.dispatch(ShowcaseEvent::Wheel { delta_y: -notch });
        }
        MouseEventKind::ScrollUp => {
            state.dispatch(ShowcaseEvent::Wheel { delta_y: notch });
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.indicator_area, mouse.column, mouse.row) {
                // Top row seeks to 0, bottom row to N.
                let area = layout.indicator_area;
                let span = area.height.saturating_sub(1).max(1);
                let fraction = f64::from(mouse.row - area.y) / f64::from(span);
                let scalar = fraction * state.showcase.item_count() as f64;
                state.dispatch(ShowcaseEvent::Seek(scalar));
                return;
            }
            if !point_in_rect(layout.stage_area, mouse.column, mouse.row) {
                return;
            }
            state.dragging = true;
            let y = drag_y(state, mouse.row);
            let at_ms = state.clock_ms();
            state.dispatch(ShowcaseEvent::TouchStart { y, at_ms });
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !state.dragging {
                return;
            }
            let y = drag_y(state, mouse.row);
            let at_ms = state.clock_ms();
            state.dispatch(ShowcaseEvent::TouchMove { y, at_ms });
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.dragging {
                state.dragging = false;
                state.dispatch(ShowcaseEvent::TouchEnd);
            }
        }
        _ => {}
    }
}

/// Terminal row → vertical touch position in layout units.
fn drag_y(state: &AppState, row: u16) -> f64 {
    f64::from(row) * state.config.cell_height
}
