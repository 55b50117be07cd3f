//! Application error taxonomy

use thiserror::Error;

/// Errors surfaced by state operations.
///
/// None of these are fatal: an invalid duration is reported back to the
/// caller and everything else degrades to "no notification is shown".
#[derive(Debug, Error)]
pub enum AppError {
    /// User attempted to configure a non-positive countdown duration
    #[error("Please set a time greater than 0 seconds (got {0}).")]
    InvalidDuration(i64),

    /// A shared-state lock was poisoned
    #[error("Failed to lock state: {0}")]
    Lock(String),
}
