//! Coordinator background task
//!
//! Mediates between the timer engine and the reminder worker, which never
//! address each other directly.

use std::sync::Arc;

use tracing::{error, info};

use crate::state::AppState;
use crate::worker::WorkerMessage;

/// Background task that watches the response flag and issues the matching
/// worker directive on every flip.
///
/// This is level-triggered: a flip to an unchanged value still re-issues
/// the directive, and the worker's idempotent start handling absorbs the
/// duplicates. Clearing the flag also forces the timer back to idle.
pub async fn coordinator_task(state: Arc<AppState>) {
    info!("Starting coordinator task");

    let mut needs_response = state.needs_response_tx.subscribe();

    // A completion raised before this task's first poll must still start
    // reminders. The flag is created false, so a false here needs no
    // directive yet.
    if *needs_response.borrow_and_update() {
        apply_flag(&state, true);
    }

    loop {
        if needs_response.changed().await.is_err() {
            break;
        }
        let flagged = *needs_response.borrow_and_update();
        apply_flag(&state, flagged);
    }
}

/// Issue the worker directive matching the response flag
fn apply_flag(state: &AppState, flagged: bool) {
    if flagged {
        info!("Countdown awaiting response, starting reminders");
        state.post_worker(WorkerMessage::StartReminders);
    } else {
        info!("Response flag cleared, stopping reminders");
        state.post_worker(WorkerMessage::StopReminders);

        if let Err(e) = state.external_reset() {
            error!("Failed to reset timer after response: {}", e);
        }
    }
}
