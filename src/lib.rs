//! Daylog - structured logging and retention engine
//!
//! The logging subsystem of a small CRUD backend: leveled, context-enriched
//! log events fan out to a colorized console and per-level JSON-lines day
//! files, with sensitive-field redaction and 90-day retention.

pub mod config;
pub mod http;
pub mod logging;
