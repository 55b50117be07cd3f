//! Reminder worker module
//!
//! The worker is the background half of the application: a long-lived task
//! addressed only through a one-way message channel, mirroring how the
//! timer side would talk to a service worker. Messages are best-effort;
//! nothing is queued for a worker that is not running.

pub mod messages;
pub mod reminder;

// Re-export main types
pub use messages::WorkerMessage;
pub use reminder::reminder_worker_task;
