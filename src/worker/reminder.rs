//! Reminder worker background task
//!
//! This is the long-lived counterpart of the foreground timer: it keeps
//! firing reminder notifications on a fixed cadence until told to stop,
//! regardless of what the timer side is doing. It is reachable only
//! through its message channel and processes messages one at a time in
//! arrival order, so the reminder loop needs no locking.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval};
use tracing::{debug, info};

use crate::services::notify::{
    Notifier, DONE_BODY, DONE_TITLE, REMINDER_BODY, REMINDER_TITLE, TEST_BODY, TEST_TITLE,
};

use super::messages::WorkerMessage;

/// The worker's reminder loop: at most one periodic emission task exists
/// at any time, no matter how many start messages arrive.
struct ReminderLoop {
    cadence: Duration,
    active: Option<Interval>,
}

impl ReminderLoop {
    fn new(cadence: Duration) -> Self {
        Self {
            cadence,
            active: None,
        }
    }

    /// Arm the loop. Idempotent: a loop that is already running keeps its
    /// cadence and is not replaced.
    fn start(&mut self) {
        if self.active.is_none() {
            info!("starting reminder loop");
            self.active = Some(interval_at(Instant::now() + self.cadence, self.cadence));
        }
    }

    fn stop(&mut self) {
        if self.active.take().is_some() {
            info!("stopping reminder loop");
        }
    }

    /// Wait for the next reminder emission. Pends forever while the loop
    /// is inactive, which makes it safe to poll inside a `select!`.
    async fn tick(&mut self) {
        match self.active.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending().await,
        }
    }
}

/// Run the reminder worker until its message channel closes.
///
/// `START` emits a completion notification immediately and arms the
/// reminder loop; `STOP` disarms it; `TEST` emits a one-off notification
/// without touching the loop. Unrecognized messages are dropped.
pub async fn reminder_worker_task(
    mut rx: mpsc::Receiver<WorkerMessage>,
    notifier: Arc<dyn Notifier>,
    cadence: Duration,
) {
    info!("reminder worker started, cadence {:?}", cadence);

    let mut reminders = ReminderLoop::new(cadence);

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Some(WorkerMessage::StartReminders) => {
                        notifier.notify(DONE_TITLE, DONE_BODY);
                        reminders.start();
                    }
                    Some(WorkerMessage::StopReminders) => {
                        reminders.stop();
                    }
                    Some(WorkerMessage::Test) => {
                        notifier.notify(TEST_TITLE, TEST_BODY);
                    }
                    Some(WorkerMessage::Unknown) => {
                        debug!("ignoring unrecognized worker message");
                    }
                    None => {
                        info!("reminder channel closed, worker exiting");
                        break;
                    }
                }
            }
            _ = reminders.tick() => {
                notifier.notify(REMINDER_TITLE, REMINDER_BODY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::{advance, sleep};

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        fn titles(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(title, _)| title.clone())
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, title: &str, body: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
        }
    }

    fn spawn_worker(
        cadence: Duration,
    ) -> (mpsc::Sender<WorkerMessage>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(reminder_worker_task(
            rx,
            notifier.clone() as Arc<dyn Notifier>,
            cadence,
        ));
        (tx, notifier)
    }

    /// Let the worker task drain its channel in virtual time
    async fn settle() {
        sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_emits_completion_then_reminders_on_cadence() {
        let (tx, notifier) = spawn_worker(Duration::from_secs(60));

        tx.send(WorkerMessage::StartReminders).await.unwrap();
        settle().await;
        assert_eq!(notifier.titles(), vec![DONE_TITLE]);

        advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(notifier.titles(), vec![DONE_TITLE, REMINDER_TITLE]);

        advance(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(notifier.titles().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent() {
        let (tx, notifier) = spawn_worker(Duration::from_secs(60));

        tx.send(WorkerMessage::StartReminders).await.unwrap();
        settle().await;

        // A second start 30s in must not stack a second loop or reset
        // the cadence of the first
        advance(Duration::from_secs(30)).await;
        tx.send(WorkerMessage::StartReminders).await.unwrap();
        settle().await;

        advance(Duration::from_secs(30)).await;
        settle().await;

        let titles = notifier.titles();
        let reminders = titles.iter().filter(|t| *t == REMINDER_TITLE).count();
        let done = titles.iter().filter(|t| *t == DONE_TITLE).count();
        assert_eq!(done, 2, "every start emits a completion notification");
        assert_eq!(reminders, 1, "exactly one reminder after one cadence");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_loop() {
        let (tx, notifier) = spawn_worker(Duration::from_secs(60));

        tx.send(WorkerMessage::StartReminders).await.unwrap();
        settle().await;
        tx.send(WorkerMessage::StopReminders).await.unwrap();
        settle().await;

        advance(Duration::from_secs(600)).await;
        settle().await;
        assert_eq!(notifier.titles(), vec![DONE_TITLE]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_without_active_loop_is_noop() {
        let (tx, notifier) = spawn_worker(Duration::from_secs(60));

        tx.send(WorkerMessage::StopReminders).await.unwrap();
        settle().await;
        assert!(notifier.titles().is_empty());

        // Worker is still alive and serviceable afterwards
        tx.send(WorkerMessage::Test).await.unwrap();
        settle().await;
        assert_eq!(notifier.titles(), vec![TEST_TITLE]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_does_not_touch_the_loop() {
        let (tx, notifier) = spawn_worker(Duration::from_secs(60));

        tx.send(WorkerMessage::StartReminders).await.unwrap();
        tx.send(WorkerMessage::Test).await.unwrap();
        settle().await;

        advance(Duration::from_secs(60)).await;
        settle().await;

        let titles = notifier.titles();
        assert_eq!(titles, vec![DONE_TITLE, TEST_TITLE, REMINDER_TITLE]);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_messages_are_dropped() {
        let (tx, notifier) = spawn_worker(Duration::from_secs(60));

        tx.send(WorkerMessage::Unknown).await.unwrap();
        settle().await;
        assert!(notifier.titles().is_empty());
    }
}
