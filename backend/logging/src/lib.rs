//! Structured logging for the prestige bot.
//!
//! Handles subscriber setup (console plus optional rolling NDJSON files),
//! secret redaction, and the per-command audit trail.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{CommandEvent, EventLogEntry, EventLogger};
pub use logger::{init_logger, LoggerGuard};
pub use redact::redact_sensitive_data;
