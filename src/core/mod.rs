//! Core algorithms — scroll normalisation, layout, mode, and animation
//! orchestration.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Geometry is
//! expressed in abstract layout units; the UI layer decides how those map to
//! terminal cells.

pub mod anim;
pub mod input;
pub mod layout;
pub mod mode;
pub mod panel;
pub mod presenter;
pub mod scheduler;
pub mod showcase;
