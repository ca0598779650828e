//! Application orchestration — state management, event reader, and input handling.

pub mod event;
pub mod handler;
pub mod state;
pub mod terminal;
