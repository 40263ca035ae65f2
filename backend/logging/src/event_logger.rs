//! Command Event Logger
//!
//! One structured audit record per handled command, emitted on the
//! `prestige_events` target so it can be filtered into its own log stream.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandEvent {
    /// A prestige value was stored.
    Accepted { value: u64 },
    /// The submission ended with a user-visible rejection (format, source, regression, ...).
    Rejected { reason: String },
    /// A report was rendered.
    Reported { current: Option<u64> },
    /// The command failed unexpectedly.
    Failed { error_msg: String },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub command: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: CommandEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Builds the audit entry, redacting any free-form error text.
    pub fn entry(command: &str, user_id: &str, mut event: CommandEvent) -> EventLogEntry {
        if let CommandEvent::Failed { error_msg } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }
        EventLogEntry {
            command: command.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn log_event(command: &str, user_id: &str, event: CommandEvent) {
        let entry = Self::entry(command, user_id, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "prestige_events", event = %json, "Command event"),
            Err(_) => info!(target: "prestige_events", event = ?entry, "Command event"),
        }
    }
}
