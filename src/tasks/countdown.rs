//! Countdown tick driver background task

use std::{sync::Arc, time::Duration};

use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::{AppState, TimerStatus};

/// Background task that drives the countdown while the timer is running.
///
/// A fresh one-second interval is established every time the timer enters
/// the running state and dropped the moment it leaves it for any reason
/// (pause, reset, reconfigure, completion), so no stray tick ever reaches
/// a timer that is not running.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut updates = state.timer_update_tx.subscribe();

    loop {
        // Inspect the current snapshot before waiting: a timer that was
        // configured and started before this task's first poll has
        // already been broadcast and would never produce another wakeup.
        let driving = {
            let snapshot = updates.borrow_and_update();
            if snapshot.status == TimerStatus::Running && snapshot.time_left > 0 {
                debug!("Timer running with {}s left, driving ticks", snapshot.time_left);
                true
            } else {
                false
            }
        };

        if !driving {
            if updates.changed().await.is_err() {
                break;
            }
            continue;
        }

        // Fresh tick driver, scoped exactly to "currently running".
        // The first tick lands one full second from now.
        let period = Duration::from_secs(1);
        let mut ticks = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    match state.tick_timer() {
                        Ok(true) => {
                            info!("Countdown complete");
                            break;
                        }
                        Ok(false) => {}
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                            break;
                        }
                    }
                }

                // Timer update - check if the driver should be torn down
                changed = updates.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    let status = updates.borrow_and_update().status;
                    if status != TimerStatus::Running {
                        debug!("Timer left running state, stopping tick driver");
                        break;
                    }
                }
            }
        }
    }
}
