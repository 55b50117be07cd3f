//! State management module
//!
//! This module contains the timer state machine and the shared
//! application state that coordinates it with the reminder worker.

pub mod app_state;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use timer::{reduce, TimerAction, TimerState, TimerStatus};
