//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod coordinator;
pub mod countdown;

// Re-export main functions
pub use coordinator::coordinator_task;
pub use countdown::countdown_task;
