//! Sink capability interface.

use super::LogEvent;

/// A destination that renders and emits log events.
///
/// Implementations must never panic or propagate failures to the caller: a
/// sink that cannot emit reports on the diagnostic side channel and drops
/// the event. The logger holds an ordered list of these, so new
/// destinations can be added without touching the facade.
///
/// # Object Safety
/// This trait is object-safe to allow `Arc<dyn LogSink>` usage.
pub trait LogSink: Send + Sync {
    /// Render and emit one event.
    fn accept(&self, event: &LogEvent);

    /// Block until previously accepted events have been emitted.
    ///
    /// Sinks that emit synchronously keep the default no-op.
    fn flush(&self) {}
}
