//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use crate::error::AppError;
use crate::worker::WorkerMessage;

use super::{TimerState, TimerStatus};

/// Main application state shared between the HTTP surface, the countdown
/// task and the coordinator task
#[derive(Debug)]
pub struct AppState {
    /// Timer engine state
    pub timer: Arc<Mutex<TimerState>>,
    /// True while a completed countdown awaits user acknowledgment
    pub needs_response_tx: watch::Sender<bool>,
    /// Channel for timer snapshots, driving the countdown task
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receivers alive to prevent channel closure
    pub _needs_response_rx: watch::Receiver<bool>,
    pub _timer_update_rx: watch::Receiver<TimerState>,
    /// Sender towards the reminder worker; `None` until the worker is
    /// registered, so "no active channel" stays representable
    pub worker_tx: Mutex<Option<mpsc::Sender<WorkerMessage>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState with an unconfigured timer and no worker
    /// channel attached yet
    pub fn new(port: u16, host: String) -> Self {
        let (needs_response_tx, needs_response_rx) = watch::channel(false);
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            timer: Arc::new(Mutex::new(TimerState::new())),
            needs_response_tx,
            timer_update_tx,
            _needs_response_rx: needs_response_rx,
            _timer_update_rx: timer_update_rx,
            worker_tx: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Attach the reminder worker's message channel
    pub fn register_worker(&self, tx: mpsc::Sender<WorkerMessage>) {
        if let Ok(mut guard) = self.worker_tx.lock() {
            *guard = Some(tx);
            info!("reminder worker channel registered");
        }
    }

    /// Apply a mutation to the timer and broadcast the updated snapshot.
    ///
    /// If the updater fails the state is left untouched and nothing is
    /// broadcast or recorded.
    pub fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerState, AppError>
    where
        F: FnOnce(&mut TimerState) -> Result<(), AppError>,
    {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| AppError::Lock(e.to_string()))?;

        updater(&mut timer)?;
        let snapshot = timer.clone();
        drop(timer); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        // Notify the countdown task and any status watchers
        if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }

        Ok(snapshot)
    }

    /// Configure the countdown duration in seconds
    pub fn set_time(&self, seconds: i64) -> Result<TimerState, AppError> {
        info!("Setting timer to {} seconds", seconds);
        self.update_timer("set-time", |timer| timer.configure(seconds))
    }

    /// Start the countdown
    pub fn start_timer(&self) -> Result<TimerState, AppError> {
        self.update_timer("start", |timer| {
            timer.start();
            Ok(())
        })
    }

    /// Pause the countdown
    pub fn pause_timer(&self) -> Result<TimerState, AppError> {
        self.update_timer("pause", |timer| {
            timer.pause();
            Ok(())
        })
    }

    /// Resume a paused countdown
    pub fn resume_timer(&self) -> Result<TimerState, AppError> {
        self.update_timer("resume", |timer| {
            timer.resume();
            Ok(())
        })
    }

    /// Reset the countdown to the configured duration
    pub fn reset_timer(&self) -> Result<TimerState, AppError> {
        self.update_timer("reset", |timer| {
            timer.reset();
            Ok(())
        })
    }

    /// Discard the current countdown and wait for a fresh configuration
    pub fn new_timer(&self) -> Result<TimerState, AppError> {
        self.update_timer("stop-and-set-new", |timer| {
            timer.stop_and_reconfigure();
            Ok(())
        })
    }

    /// Forced reset issued by the coordinator when the response flag
    /// clears
    pub fn external_reset(&self) -> Result<TimerState, AppError> {
        self.update_timer("external-reset", |timer| {
            timer.external_reset();
            Ok(())
        })
    }

    /// Advance the countdown by one tick.
    ///
    /// Returns `true` when this tick completed the countdown; in that
    /// case the response flag is raised, which the coordinator translates
    /// into a start message for the reminder worker.
    pub fn tick_timer(&self) -> Result<bool, AppError> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| AppError::Lock(e.to_string()))?;

        let finished = timer.tick();
        let snapshot = timer.clone();
        drop(timer);

        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }

        if finished {
            info!("Countdown finished, flagging for response");
            self.set_needs_response(true);
        }

        Ok(finished)
    }

    /// User acknowledgment: clears the response flag, which triggers a
    /// stop message to the worker and an external reset of the timer
    pub fn acknowledge(&self) {
        info!("User responded, clearing response flag");
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some("respond".to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
        self.set_needs_response(false);
    }

    /// Flip the response flag. Every send wakes the coordinator, so the
    /// start/stop directive is re-issued on each flip and the worker's
    /// own idempotency absorbs duplicates.
    pub fn set_needs_response(&self, value: bool) {
        if let Err(e) = self.needs_response_tx.send(value) {
            warn!("Failed to send response flag update: {}", e);
        }
    }

    /// Check whether a completed countdown is awaiting acknowledgment
    pub fn needs_response(&self) -> bool {
        *self.needs_response_tx.borrow()
    }

    /// Post a fire-and-forget message to the reminder worker.
    ///
    /// With no worker registered, or a full channel, the message is
    /// dropped with a warning; there is no retry.
    pub fn post_worker(&self, msg: WorkerMessage) {
        let guard = match self.worker_tx.lock() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Failed to lock worker channel: {}", e);
                return;
            }
        };

        match guard.as_ref() {
            Some(tx) => {
                if let Err(e) = tx.try_send(msg) {
                    warn!("Dropping worker message {:?}: {}", msg, e);
                }
            }
            None => {
                warn!("No active reminder worker channel, dropping {:?}", msg);
            }
        }
    }

    /// Get a snapshot of the current timer state
    pub fn timer_snapshot(&self) -> Result<TimerState, AppError> {
        self.timer
            .lock()
            .map(|timer| timer.clone())
            .map_err(|e| AppError::Lock(e.to_string()))
    }

    /// Check whether the countdown is currently running
    pub fn is_running(&self) -> bool {
        self.timer_snapshot()
            .map(|timer| timer.status == TimerStatus::Running)
            .unwrap_or(false)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
