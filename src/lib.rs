//! Laundry Cat - a state-managed HTTP server that reminds you to take
//! your laundry out of the machine
//!
//! A configured countdown runs in the foreground; when it completes, a
//! background reminder worker keeps nagging on a fixed cadence until the
//! user responds.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod worker;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
pub use worker::WorkerMessage;
