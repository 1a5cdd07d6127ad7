//! Logger facade: context resolution, sanitization, and sink fan-out.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::config::Config;

use super::sanitize::{sanitize_fields, sanitize_value};
use super::{ConsoleSink, FileSink, Fields, Level, LogEvent, LogSink, DEFAULT_CONTEXT};

/// Delimiter joining an error message and its trace.
const TRACE_DELIMITER: &str = "\nTrace: ";

/// Entry point for the logging subsystem.
///
/// Holds an ordered list of active sinks and an optional context label.
/// Cloning is cheap and shares the sinks, so each component owns a logger
/// scoped to its own context (`with_context`) instead of mutating shared
/// state.
#[derive(Clone)]
pub struct Logger {
    sinks: Vec<Arc<dyn LogSink>>,
    context: Option<String>,
}

impl Logger {
    /// Build a logger from configuration.
    ///
    /// Console and file sinks are attached according to the config flags.
    /// If file logging is enabled, directory bootstrap and one retention
    /// scan run before this returns. A file sink that fails to bootstrap is
    /// reported on the diagnostic side channel and skipped — logging never
    /// fails its caller, and the remaining sinks still operate.
    pub fn new(config: &Config) -> Self {
        let mut sinks: Vec<Arc<dyn LogSink>> = Vec::new();
        if config.enable_console_logging {
            sinks.push(Arc::new(ConsoleSink::new()));
        }
        if config.enable_file_logging {
            match FileSink::with_retention(&config.log_dir, config.retention_days) {
                Ok(sink) => sinks.push(Arc::new(sink)),
                Err(e) => error!(error = %e, "Failed to initialize file logging"),
            }
        }
        Self {
            sinks,
            context: None,
        }
    }

    /// Build a logger over an explicit sink list.
    pub fn from_sinks(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self {
            sinks,
            context: None,
        }
    }

    /// Return a logger scoped to `context`, sharing this logger's sinks.
    ///
    /// The scoped context takes precedence over any per-call context hint.
    pub fn with_context(&self, context: impl Into<String>) -> Self {
        Self {
            sinks: self.sinks.clone(),
            context: Some(context.into()),
        }
    }

    /// The context label this logger stamps on events, if set.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn log(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.dispatch(Level::Log, message.into(), fields);
    }

    /// Log at `error` level, appending `trace` to the message when present.
    pub fn error(&self, message: impl Into<String>, trace: Option<&str>, fields: Option<Fields>) {
        let mut message = message.into();
        if let Some(trace) = trace {
            message.push_str(TRACE_DELIMITER);
            message.push_str(trace);
        }
        self.dispatch(Level::Error, message, fields);
    }

    pub fn warn(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.dispatch(Level::Warn, message.into(), fields);
    }

    pub fn debug(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.dispatch(Level::Debug, message.into(), fields);
    }

    pub fn verbose(&self, message: impl Into<String>, fields: Option<Fields>) {
        self.dispatch(Level::Verbose, message.into(), fields);
    }

    /// Log a completed HTTP request with the fixed http-request field set.
    pub fn log_request(
        &self,
        method: &str,
        url: &str,
        user_id: Option<&str>,
        status_code: u16,
        duration_ms: u64,
    ) {
        let mut fields = Fields::new();
        fields.insert("type".to_string(), Value::from("http-request"));
        fields.insert("method".to_string(), Value::from(method));
        fields.insert("url".to_string(), Value::from(url));
        if let Some(user_id) = user_id {
            fields.insert("userId".to_string(), Value::from(user_id));
        }
        fields.insert("statusCode".to_string(), Value::from(status_code));
        fields.insert("duration".to_string(), Value::from(format!("{duration_ms}ms")));

        self.log(format!("{method} {url}"), Some(fields));
    }

    /// Log an incoming HTTP request before it is handled.
    ///
    /// The body, when present, is sanitized before it is embedded. The
    /// event carries the `HTTP` context hint, so an unscoped logger labels
    /// it `HTTP` while a scoped one keeps its own context.
    pub fn log_request_start(
        &self,
        method: &str,
        url: &str,
        user_id: Option<&str>,
        request_id: Option<&str>,
        body: Option<&Value>,
    ) {
        let mut fields = Fields::new();
        fields.insert("type".to_string(), Value::from("request"));
        fields.insert("method".to_string(), Value::from(method));
        fields.insert("url".to_string(), Value::from(url));
        if let Some(user_id) = user_id {
            fields.insert("userId".to_string(), Value::from(user_id));
        }
        if let Some(request_id) = request_id {
            fields.insert("requestId".to_string(), Value::from(request_id));
        }
        if let Some(body) = body {
            fields.insert("body".to_string(), sanitize_value(body));
        }
        fields.insert("context".to_string(), Value::from("HTTP"));

        self.log(format!("Incoming {method} {url}"), Some(fields));
    }

    /// Log an error value, carrying its source chain as the trace and its
    /// type name as the `errorName` field.
    pub fn log_err<E: std::error::Error>(&self, error: &E, fields: Option<Fields>) {
        let trace = error_trace(error);
        let mut fields = fields.unwrap_or_default();
        fields.insert("errorName".to_string(), Value::from(error_name::<E>()));
        self.error(error.to_string(), trace.as_deref(), Some(fields));
    }

    /// Block until every sink has emitted its pending events.
    pub fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }

    /// Build the event, sanitize fields, resolve the context, and fan out
    /// to every active sink. Sinks are independent: each `accept` is
    /// best-effort and cannot prevent the others from running.
    fn dispatch(&self, level: Level, message: String, fields: Option<Fields>) {
        let mut fields = sanitize_fields(fields.as_ref());
        let context = self.resolve_context(&mut fields);
        let event = LogEvent::new(level, context, message, fields);
        for sink in &self.sinks {
            sink.accept(&event);
        }
    }

    /// Context precedence: the logger's own context wins, then a
    /// string-valued `context` key supplied with the call, then the default
    /// label. A string hint is consumed either way — it names the event's
    /// origin, it is not a data field.
    fn resolve_context(&self, fields: &mut Option<Fields>) -> String {
        let hint = fields.as_mut().and_then(|map| match map.remove("context") {
            Some(Value::String(hint)) => Some(hint),
            Some(other) => {
                map.insert("context".to_string(), other);
                None
            }
            None => None,
        });

        if let Some(context) = &self.context {
            return context.clone();
        }
        hint.unwrap_or_else(|| DEFAULT_CONTEXT.to_string())
    }
}

fn error_trace<E: std::error::Error>(error: &E) -> Option<String> {
    let mut lines = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn error_name<E: std::error::Error>() -> &'static str {
    let full = std::any::type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}
