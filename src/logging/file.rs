//! File sink: per-level JSON-lines day files with dedicated writer workers.
//!
//! Each level owns one bounded queue drained by one writer thread, so a
//! logging call only enqueues and returns, while the single writer per
//! target file preserves issue order on disk and keeps appends whole-line.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Mutex;
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, SecondsFormat};
use serde::Serialize;
use tracing::{error, info, warn};

use super::retention::{self, RETENTION_DAYS};
use super::{Fields, Level, LogEvent, LogSink};

/// Maximum pending lines per level before new entries are dropped.
pub const QUEUE_CAPACITY: usize = 1024;

/// One line of the durable format: a standalone JSON object with the
/// sanitized fields flattened at the top level.
#[derive(Serialize)]
struct FileRecord<'a> {
    timestamp: String,
    level: &'static str,
    context: &'a str,
    message: &'a str,
    #[serde(flatten)]
    fields: Option<&'a Fields>,
}

enum WorkerMsg {
    Line { date: NaiveDate, line: String },
    Flush(SyncSender<()>),
}

/// Sink that appends events to `<base>/<level>/YYYY-MM-DD.log` files.
///
/// Construction bootstraps the directory tree and runs one retention scan
/// before the sink is ready. Append failures are reported on the
/// diagnostic side channel and swallowed; they never reach the logging
/// caller.
pub struct FileSink {
    base_dir: PathBuf,
    retention_days: i64,
    /// Indexed by `Level::idx`
    senders: Vec<SyncSender<WorkerMsg>>,
    workers: Vec<JoinHandle<()>>,
    scan_lock: Mutex<()>,
}

impl FileSink {
    /// Create a sink rooted at `base_dir` with the default retention window.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_retention(base_dir, RETENTION_DAYS)
    }

    /// Create a sink with an explicit retention window in days.
    pub fn with_retention(base_dir: impl Into<PathBuf>, retention_days: i64) -> Result<Self> {
        let base_dir = base_dir.into();
        ensure_log_structure(&base_dir)?;

        let mut senders = Vec::with_capacity(Level::ALL.len());
        let mut workers = Vec::with_capacity(Level::ALL.len());
        for level in Level::ALL {
            let (tx, rx) = mpsc::sync_channel(QUEUE_CAPACITY);
            let level_dir = base_dir.join(level.dir_name());
            let handle = std::thread::Builder::new()
                .name(format!("daylog-{}", level.dir_name()))
                .spawn(move || writer_loop(level_dir, rx))
                .context("Failed to spawn log writer thread")?;
            senders.push(tx);
            workers.push(handle);
        }

        let sink = Self {
            base_dir,
            retention_days,
            senders,
            workers,
            scan_lock: Mutex::new(()),
        };

        match sink.run_retention() {
            Ok(count) if count > 0 => info!(count, "Cleaned up old log files"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Log retention scan failed"),
        }

        Ok(sink)
    }

    /// Base directory the day files live under.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Re-run the retention scan.
    ///
    /// Scans are serialized: a concurrent call waits for the in-flight scan
    /// to finish before starting its own.
    pub fn run_retention(&self) -> Result<usize> {
        let _guard = match self.scan_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        retention::cleanup_old_logs(&self.base_dir, self.retention_days)
    }
}

impl LogSink for FileSink {
    fn accept(&self, event: &LogEvent) {
        let record = FileRecord {
            timestamp: event.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            level: event.level.as_str(),
            context: &event.context,
            message: &event.message,
            fields: event.fields.as_ref(),
        };
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to serialize log record");
                return;
            }
        };

        // Day files are named by the event's local calendar date.
        let date = event.timestamp.with_timezone(&Local).date_naive();

        match self.senders[event.level.idx()].try_send(WorkerMsg::Line { date, line }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                error!(level = event.level.as_str(), "Log queue full, dropping entry");
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }

    fn flush(&self) {
        for sender in &self.senders {
            let (ack_tx, ack_rx) = mpsc::sync_channel(1);
            if sender.send(WorkerMsg::Flush(ack_tx)).is_ok() {
                let _ = ack_rx.recv();
            }
        }
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Closing the queues lets each writer drain its backlog and exit.
        self.senders.clear();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Create the base directory and one subdirectory per level.
///
/// Idempotent; safe to call on every process start.
pub fn ensure_log_structure(base_dir: &Path) -> Result<()> {
    fs::create_dir_all(base_dir).context("Failed to create log directory")?;
    for level in Level::ALL {
        fs::create_dir_all(base_dir.join(level.dir_name()))
            .context("Failed to create level directory")?;
    }
    Ok(())
}

/// Writer thread body: drains the queue for one level directory.
///
/// The current day's file stays open across appends and is reopened when
/// the date rolls over. A failed append is reported and its entry dropped;
/// the loop keeps serving later entries.
fn writer_loop(level_dir: PathBuf, rx: Receiver<WorkerMsg>) {
    let mut open_file: Option<(NaiveDate, File)> = None;

    while let Ok(msg) = rx.recv() {
        match msg {
            WorkerMsg::Line { date, line } => {
                let rotated = match &open_file {
                    Some((open_date, _)) => *open_date != date,
                    None => true,
                };
                if rotated {
                    open_file = match open_day_file(&level_dir, date) {
                        Ok(file) => Some((date, file)),
                        Err(e) => {
                            error!(
                                dir = %level_dir.display(),
                                error = %e,
                                "Failed to open log file"
                            );
                            None
                        }
                    };
                }

                if let Some((_, file)) = &mut open_file {
                    if let Err(e) = writeln!(file, "{line}") {
                        error!(
                            dir = %level_dir.display(),
                            error = %e,
                            "Failed to write log entry"
                        );
                        open_file = None;
                    }
                }
            }
            WorkerMsg::Flush(ack) => {
                if let Some((_, file)) = &mut open_file {
                    let _ = file.flush();
                }
                let _ = ack.send(());
            }
        }
    }
}

fn open_day_file(level_dir: &Path, date: NaiveDate) -> std::io::Result<File> {
    // The level directory can vanish at runtime (external cleanup); the
    // missing-directory failure case is recovered here.
    fs::create_dir_all(level_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(level_dir.join(format!("{}.log", date.format("%Y-%m-%d"))))
}
