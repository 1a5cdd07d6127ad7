//! Age-based deletion of day log files.
//!
//! Scans every level directory for `YYYY-MM-DD.log` files and deletes those
//! older than the retention window. Anything else in the directories is
//! left untouched.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::warn;

use super::Level;

/// Retention window in whole days. Files strictly older are deleted.
pub const RETENTION_DAYS: i64 = 90;

/// Parse a `YYYY-MM-DD.log` file name into its date.
///
/// Returns `None` for any other shape; such files are never deleted.
pub(crate) fn parse_file_date(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(".log")?;
    if stem.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

/// Delete day files older than `retention_days` across all level
/// directories under `base_dir`.
///
/// Deletion is best-effort per file: a failure is reported on the side
/// channel and the scan continues. Returns the number of files deleted.
pub fn cleanup_old_logs(base_dir: &Path, retention_days: i64) -> Result<usize> {
    cleanup_before(base_dir, retention_days, Local::now().date_naive())
}

pub(crate) fn cleanup_before(
    base_dir: &Path,
    retention_days: i64,
    today: NaiveDate,
) -> Result<usize> {
    let mut deleted = 0;

    for level in Level::ALL {
        let dir = base_dir.join(level.dir_name());
        if !dir.exists() {
            continue;
        }

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;

            let date = match entry.file_name().to_str().and_then(parse_file_date) {
                Some(date) => date,
                None => continue,
            };

            let age_days = today.signed_duration_since(date).num_days();
            if age_days > retention_days {
                if let Err(e) = fs::remove_file(entry.path()) {
                    warn!(
                        file = %entry.path().display(),
                        error = %e,
                        "Failed to delete expired log file"
                    );
                } else {
                    deleted += 1;
                }
            }
        }
    }

    Ok(deleted)
}
