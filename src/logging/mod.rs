//! Structured logging and retention engine
//!
//! Leveled, context-enriched log events fan out to a colorized console
//! sink and per-level JSON-lines day files, with sensitive-field redaction
//! and age-based retention.

mod console;
mod event;
mod file;
mod level;
mod logger;
mod retention;
mod sanitize;
mod sink;

pub use console::ConsoleSink;
pub use event::{Fields, LogEvent, DEFAULT_CONTEXT};
pub use file::{ensure_log_structure, FileSink, QUEUE_CAPACITY};
pub use level::Level;
pub use logger::Logger;
pub use retention::{cleanup_old_logs, RETENTION_DAYS};
pub use sanitize::{sanitize_fields, sanitize_value, REDACTION_MARKER, SENSITIVE_KEYS};
pub use sink::LogSink;
