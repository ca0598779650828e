//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer reads the *core* timeline values each frame and turns them
//! into cells on the terminal.  It never mutates showcase state.

pub mod indicator;
pub mod layout;
pub mod panel;
pub mod stage;
pub mod theme;
