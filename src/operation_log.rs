//! Append-only audit log of admin decisions.
//!
//! Every applied approve/reject is recorded with a timestamp and the active
//! environment so there is a durable trail of who-did-what against which
//! backend, independent of the server's own records.

use anyhow::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::session::app_data_dir;

const AUDIT_LOG_FILE: &str = "audit_log.txt";

fn log_path() -> PathBuf {
    app_data_dir().join(AUDIT_LOG_FILE)
}

/// Full path to the audit log as a display string.
pub fn log_file_path() -> String {
    log_path().display().to_string()
}

/// Append one entry. `action` is a short title ("Withdrawal approved"),
/// `environment` the backend label, `details` free-form lines.
pub fn append_log(action: &str, environment: &str, details: impl AsRef<str>) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())?;

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    writeln!(file, "=== [{}] {} ({}) ===", timestamp, action, environment)?;
    writeln!(file, "{}", details.as_ref().trim_end())?;
    writeln!(file)?;
    Ok(())
}

/// Read the whole log. Returns an empty string if nothing was logged yet.
pub fn read_log() -> Result<String> {
    match fs::read_to_string(log_path()) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}
