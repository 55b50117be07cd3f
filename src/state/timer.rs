//! Timer state machine for the laundry countdown

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Status of the laundry countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimerStatus {
    /// No duration configured yet, waiting for input
    Waiting,
    /// Configured but not counting down
    Idle,
    /// Actively counting down
    Running,
    /// Countdown suspended, remaining time retained
    Paused,
    /// Countdown reached zero, awaiting user response
    Completed,
}

/// Actions that drive the timer state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    SetTime,
    Start,
    Pause,
    Resume,
    Reset,
    Finish,
}

/// Transition table for the timer state machine.
///
/// Pairs not listed here are illegal and leave the status unchanged.
pub fn reduce(status: TimerStatus, action: TimerAction) -> TimerStatus {
    use TimerAction::*;
    use TimerStatus::*;

    match (status, action) {
        (_, SetTime) => Waiting,
        (Waiting | Idle | Paused, Start) => Running,
        (Running, Pause) => Paused,
        (Paused, Resume) => Running,
        (_, Reset) => Idle,
        (Running, Finish) => Completed,
        (current, _) => current,
    }
}

/// Timer state for tracking the laundry countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    pub status: TimerStatus,
    /// Originally configured duration in seconds
    pub start_time: u64,
    /// Remaining seconds, decremented once per tick while running
    pub time_left: u64,
}

impl TimerState {
    /// Create a fresh timer with no duration configured
    pub fn new() -> Self {
        Self {
            status: TimerStatus::Waiting,
            start_time: 0,
            time_left: 0,
        }
    }

    /// Configure the countdown duration in seconds.
    ///
    /// Fails without touching any state if `seconds` is not a positive
    /// integer. A successful configure always lands in `Waiting`; an
    /// explicit `start()` is required to begin counting down.
    pub fn configure(&mut self, seconds: i64) -> Result<(), AppError> {
        if seconds <= 0 {
            return Err(AppError::InvalidDuration(seconds));
        }

        self.start_time = seconds as u64;
        self.time_left = seconds as u64;
        self.status = reduce(self.status, TimerAction::SetTime);
        Ok(())
    }

    /// Start the countdown. No-op when there is no time left to count.
    pub fn start(&mut self) {
        if self.time_left > 0 {
            self.status = reduce(self.status, TimerAction::Start);
        }
    }

    /// Suspend the countdown, retaining the remaining time
    pub fn pause(&mut self) {
        self.status = reduce(self.status, TimerAction::Pause);
    }

    /// Resume a paused countdown from the retained remaining time
    pub fn resume(&mut self) {
        self.status = reduce(self.status, TimerAction::Resume);
    }

    /// Restore the configured duration and stop counting
    pub fn reset(&mut self) {
        self.time_left = self.start_time;
        self.status = reduce(self.status, TimerAction::Reset);
    }

    /// Discard current progress and return to `Waiting` for a fresh
    /// configuration
    pub fn stop_and_reconfigure(&mut self) {
        self.status = reduce(self.status, TimerAction::SetTime);
    }

    /// Forced reset issued by the coordinator when the response flag is
    /// cleared from outside. Always lands in `Idle`.
    pub fn external_reset(&mut self) {
        self.time_left = self.start_time;
        self.status = reduce(self.status, TimerAction::Reset);
    }

    /// Advance the countdown by one second.
    ///
    /// Only has an effect while running. Returns `true` exactly once per
    /// completion, on the tick that clamps the remaining time to zero and
    /// transitions to `Completed`.
    pub fn tick(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }

        if self.time_left <= 1 {
            self.time_left = 0;
            self.status = reduce(self.status, TimerAction::Finish);
            return true;
        }

        self.time_left -= 1;
        false
    }

    /// Check if the countdown is actively running
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_waiting() {
        let timer = TimerState::new();
        assert_eq!(timer.status, TimerStatus::Waiting);
        assert_eq!(timer.start_time, 0);
        assert_eq!(timer.time_left, 0);
    }

    #[test]
    fn reduce_follows_transition_table() {
        use TimerAction::*;
        use TimerStatus::*;

        assert_eq!(reduce(Waiting, Start), Running);
        assert_eq!(reduce(Idle, Start), Running);
        assert_eq!(reduce(Paused, Start), Running);
        assert_eq!(reduce(Running, Pause), Paused);
        assert_eq!(reduce(Paused, Resume), Running);
        assert_eq!(reduce(Running, Finish), Completed);
        assert_eq!(reduce(Completed, Reset), Idle);
        assert_eq!(reduce(Running, SetTime), Waiting);
    }

    #[test]
    fn reduce_ignores_illegal_transitions() {
        use TimerAction::*;
        use TimerStatus::*;

        assert_eq!(reduce(Paused, Pause), Paused);
        assert_eq!(reduce(Idle, Resume), Idle);
        assert_eq!(reduce(Completed, Finish), Completed);
        assert_eq!(reduce(Waiting, Finish), Waiting);
        assert_eq!(reduce(Completed, Start), Completed);
    }

    #[test]
    fn configure_rejects_non_positive_durations() {
        let mut timer = TimerState::new();
        timer.configure(90).unwrap();
        timer.start();
        timer.tick();

        let before = timer.clone();
        assert!(timer.configure(0).is_err());
        assert!(timer.configure(-1).is_err());

        assert_eq!(timer.status, before.status);
        assert_eq!(timer.start_time, before.start_time);
        assert_eq!(timer.time_left, before.time_left);
    }

    #[test]
    fn configure_always_lands_in_waiting() {
        let mut timer = TimerState::new();
        timer.configure(30).unwrap();
        assert_eq!(timer.status, TimerStatus::Waiting);

        timer.start();
        timer.tick();
        timer.configure(45).unwrap();
        assert_eq!(timer.status, TimerStatus::Waiting);
        assert_eq!(timer.time_left, 45);
    }

    #[test]
    fn full_countdown_completes_at_zero() {
        for seconds in [1i64, 5, 60] {
            let mut timer = TimerState::new();
            timer.configure(seconds).unwrap();
            timer.start();

            for i in 1..seconds {
                assert!(!timer.tick(), "finished early at tick {}", i);
            }
            assert!(timer.tick());
            assert_eq!(timer.status, TimerStatus::Completed);
            assert_eq!(timer.time_left, 0);
        }
    }

    #[test]
    fn finish_signal_fires_only_once() {
        let mut timer = TimerState::new();
        timer.configure(1).unwrap();
        timer.start();

        assert!(timer.tick());
        assert!(!timer.tick());
        assert_eq!(timer.status, TimerStatus::Completed);
        assert_eq!(timer.time_left, 0);
    }

    #[test]
    fn start_is_noop_without_time_left() {
        let mut timer = TimerState::new();
        timer.start();
        assert_eq!(timer.status, TimerStatus::Waiting);
    }

    #[test]
    fn pause_and_resume_preserve_time_left() {
        let mut timer = TimerState::new();
        timer.configure(10).unwrap();
        timer.start();
        timer.tick();
        timer.pause();

        assert_eq!(timer.status, TimerStatus::Paused);
        assert_eq!(timer.time_left, 9);

        // A tick while paused must not decrement
        assert!(!timer.tick());
        assert_eq!(timer.time_left, 9);

        timer.resume();
        timer.tick();
        assert_eq!(timer.time_left, 8);
    }

    #[test]
    fn start_from_paused_resumes_the_countdown() {
        let mut timer = TimerState::new();
        timer.configure(10).unwrap();
        timer.start();
        timer.tick();
        timer.pause();

        // Start with time left is never a silent no-op
        timer.start();
        assert_eq!(timer.status, TimerStatus::Running);
        timer.tick();
        assert_eq!(timer.time_left, 8);
    }

    #[test]
    fn reset_restores_configured_duration() {
        let mut timer = TimerState::new();
        timer.configure(20).unwrap();
        timer.start();
        timer.tick();
        timer.tick();
        timer.reset();

        assert_eq!(timer.status, TimerStatus::Idle);
        assert_eq!(timer.time_left, 20);
    }

    #[test]
    fn stop_and_reconfigure_discards_progress() {
        let mut timer = TimerState::new();
        timer.configure(60).unwrap();
        timer.start();
        timer.tick();
        timer.stop_and_reconfigure();

        assert_eq!(timer.status, TimerStatus::Waiting);

        timer.configure(20).unwrap();
        assert_eq!(timer.start_time, 20);
        assert_eq!(timer.time_left, 20);
    }

    #[test]
    fn external_reset_forces_idle() {
        let mut timer = TimerState::new();
        timer.configure(5).unwrap();
        timer.start();
        for _ in 0..5 {
            timer.tick();
        }
        assert_eq!(timer.status, TimerStatus::Completed);

        timer.external_reset();
        assert_eq!(timer.status, TimerStatus::Idle);
        assert_eq!(timer.time_left, 5);
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&TimerStatus::Completed).unwrap();
        assert_eq!(json, "\"COMPLETED\"");
    }
}
