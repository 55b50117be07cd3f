//! Message protocol for the reminder worker channel

use serde::{Deserialize, Serialize};

/// Tagged message posted to the reminder worker.
///
/// The wire shape is `{ "action": "..." }` with no other fields.
/// Unrecognized actions deserialize to `Unknown` and are ignored by the
/// worker rather than surfacing an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum WorkerMessage {
    StartReminders,
    StopReminders,
    Test,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_use_action_tag() {
        let json = serde_json::to_string(&WorkerMessage::StartReminders).unwrap();
        assert_eq!(json, r#"{"action":"startReminders"}"#);

        let msg: WorkerMessage = serde_json::from_str(r#"{"action":"stopReminders"}"#).unwrap();
        assert_eq!(msg, WorkerMessage::StopReminders);

        let msg: WorkerMessage = serde_json::from_str(r#"{"action":"test"}"#).unwrap();
        assert_eq!(msg, WorkerMessage::Test);
    }

    #[test]
    fn unrecognized_actions_are_ignored_not_errors() {
        let msg: WorkerMessage = serde_json::from_str(r#"{"action":"selfDestruct"}"#).unwrap();
        assert_eq!(msg, WorkerMessage::Unknown);
    }
}
