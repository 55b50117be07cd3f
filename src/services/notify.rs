//! Notification presentation via the desktop notification surface

use tokio::process::Command;
use tracing::{debug, info, warn};

/// Notification title and body pairs used by the reminder worker
pub const DONE_TITLE: &str = "Laundry Done!";
pub const DONE_BODY: &str = "Your Laundry has completed Washing!";
pub const REMINDER_TITLE: &str = "Laundry Reminder!";
pub const REMINDER_BODY: &str = "Your Laundry is still on the Machine! Have you taken it out?";
pub const TEST_TITLE: &str = "Hi! from Laundry Cat";
pub const TEST_BODY: &str = "This is a test-notification!";

/// Fire-and-forget notification sink.
///
/// Emission never fails from the caller's perspective: if the host
/// notification surface is unavailable, the single emission is dropped
/// and the caller's cadence is unaffected.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Notifier backed by `notify-send`
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        let title = title.to_string();
        let body = body.to_string();

        tokio::spawn(async move {
            match Command::new("notify-send").arg(&title).arg(&body).output().await {
                Ok(output) if !output.status.success() => {
                    debug!("notify-send exited with {}, emission dropped", output.status);
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("notification surface unavailable, emission dropped: {}", e);
                }
            }
        });
    }
}

/// Check whether `notify-send` is available on this system.
///
/// Unavailability is not fatal: reminders silently degrade to log output.
pub async fn check_notify_available() {
    match Command::new("notify-send").arg("--version").output().await {
        Ok(_) => info!("notify-send is available"),
        Err(_) => {
            warn!("notify-send is not available, desktop notifications will be dropped");
        }
    }
}
