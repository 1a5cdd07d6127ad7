//! Colorized console sink.
//!
//! Renders each event as one human-readable line:
//! `[LEVEL] HH:MM:SS [context] message {fields}`.

use std::io::Write;

use chrono::Local;

use super::{Level, LogEvent, LogSink};

const RESET: &str = "\x1b[0m";

/// ANSI color tag for a level.
fn color(level: Level) -> &'static str {
    match level {
        Level::Log => "\x1b[32m",     // green
        Level::Error => "\x1b[31m",   // red
        Level::Warn => "\x1b[33m",    // yellow
        Level::Debug => "\x1b[36m",   // cyan
        Level::Verbose => "\x1b[35m", // magenta
    }
}

/// Sink that writes colorized lines to the terminal.
///
/// `error` events go to stderr, every other level to stdout. Terminal
/// output is best-effort: write and formatting failures degrade to partial
/// or missing output, never to a panic.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

/// Render one event as a console line. The clock is local time.
pub(crate) fn format_line(event: &LogEvent) -> String {
    let time = event.timestamp.with_timezone(&Local).format("%H:%M:%S");
    let mut line = format!(
        "{}[{}]{} {} [{}] {}",
        color(event.level),
        event.level.as_str(),
        RESET,
        time,
        event.context,
        event.message
    );
    if let Some(fields) = &event.fields {
        if !fields.is_empty() {
            if let Ok(json) = serde_json::to_string(fields) {
                line.push(' ');
                line.push_str(&json);
            }
        }
    }
    line
}

impl LogSink for ConsoleSink {
    fn accept(&self, event: &LogEvent) {
        let line = format_line(event);
        match event.level {
            Level::Error => {
                let _ = writeln!(std::io::stderr().lock(), "{line}");
            }
            _ => {
                let _ = writeln!(std::io::stdout().lock(), "{line}");
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().lock().flush();
        let _ = std::io::stderr().lock().flush();
    }
}
