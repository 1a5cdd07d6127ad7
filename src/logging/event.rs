//! Log event type shared by all sinks.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::Level;

/// Structured fields attached to a log event.
pub type Fields = Map<String, Value>;

/// Context label used when neither the logger nor the call site supplies one.
pub const DEFAULT_CONTEXT: &str = "Application";

/// A single log event, built once by the logger and handed to each enabled
/// sink.
///
/// The timestamp is assigned at creation so both sinks report the same
/// instant. Sinks render and forget; nothing retains the event past
/// dispatch.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Instant of creation
    pub timestamp: DateTime<Utc>,
    /// Severity level
    pub level: Level,
    /// Resolved context label (see `Logger` for precedence)
    pub context: String,
    /// Rendered message; for error events may carry an appended trace
    pub message: String,
    /// Sanitized structured fields, if any
    pub fields: Option<Fields>,
}

impl LogEvent {
    /// Create a new event stamped with the current time.
    pub fn new(
        level: Level,
        context: impl Into<String>,
        message: impl Into<String>,
        fields: Option<Fields>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            context: context.into(),
            message: message.into(),
            fields,
        }
    }
}
