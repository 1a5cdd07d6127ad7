//! Log level taxonomy
//!
//! Five fixed levels, routed by name. There is no severity threshold in
//! this design — every event is dispatched to every enabled sink.

/// Severity taxonomy for log events.
///
/// The set is closed: routing (file subdirectory, console color, output
/// stream) is total over these five variants, so an unknown level is a
/// compile error rather than a runtime case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Log,
    Error,
    Warn,
    Debug,
    Verbose,
}

impl Level {
    /// All levels, in the order their directories are created.
    pub const ALL: [Level; 5] = [
        Level::Log,
        Level::Error,
        Level::Warn,
        Level::Debug,
        Level::Verbose,
    ];

    /// Upper-cased name used in file records and console tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Log => "LOG",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Debug => "DEBUG",
            Level::Verbose => "VERBOSE",
        }
    }

    /// Directory name under the base log directory.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Level::Log => "log",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Debug => "debug",
            Level::Verbose => "verbose",
        }
    }

    /// Index into per-level tables (writer queues).
    pub(crate) fn idx(self) -> usize {
        self as usize
    }
}
