//! Redaction of sensitive fields.
//!
//! Runs before a payload reaches any sink; it is not sink-specific.

use serde_json::Value;

use super::Fields;

/// Keys whose values are never written to a sink.
pub const SENSITIVE_KEYS: [&str; 4] = ["password", "token", "secret", "apiKey"];

/// Replacement for redacted values.
pub const REDACTION_MARKER: &str = "***REDACTED***";

/// Return a copy of `fields` with every sensitive key replaced by the
/// redaction marker.
///
/// Keys are matched at the top level only. The input is never modified; an
/// absent payload yields an absent result.
pub fn sanitize_fields(fields: Option<&Fields>) -> Option<Fields> {
    fields.map(|map| {
        let mut out = map.clone();
        for key in SENSITIVE_KEYS {
            if out.contains_key(key) {
                out.insert(key.to_string(), Value::String(REDACTION_MARKER.to_string()));
            }
        }
        out
    })
}

/// Sanitize an arbitrary JSON value.
///
/// Objects are copied with sensitive keys redacted; any other shape passes
/// through unchanged.
pub fn sanitize_value(value: &Value) -> Value {
    match value.as_object() {
        Some(map) => Value::Object(sanitize_fields(Some(map)).unwrap_or_default()),
        None => value.clone(),
    }
}
