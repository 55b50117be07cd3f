//! External service module
//!
//! This module contains the notification presentation surface the
//! reminder worker emits through.

pub mod notify;

// Re-export main types
pub use notify::{check_notify_available, DesktopNotifier, Notifier};
