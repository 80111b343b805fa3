//! Debug-log collaborator injected into the client.
//!
//! Recording is fire-and-forget: implementations must never fail the
//! operation they describe.

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::SystemTime;

use humantime::format_rfc3339;
use log::warn;
use serde::Serialize;
use serde_json::Value;

/// Default log file, relative to the working directory.
pub const DEBUG_LOG_FILE_NAME: &str = "opencode.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Display for Severity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        let name = match self {
            Severity::Emergency => "Emergency",
            Severity::Alert => "Alert",
            Severity::Critical => "Critical",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Notice => "Notice",
            Severity::Info => "Info",
            Severity::Debug => "Debug",
        };
        formatter.write_str(name)
    }
}

/// Called from inside async operations; implementations must not block.
pub trait DebugLog: Send + Sync {
    fn record(&self, severity: Severity, operation: &str, payload: &Value);
}

/// Discards every record. Used when debug mode is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDebugLog;

impl DebugLog for NoopDebugLog {
    fn record(&self, _severity: Severity, _operation: &str, _payload: &Value) {}
}

/// Appends one line per record to a local file.
///
/// Lines are handed to a dedicated writer thread, so `record` never touches
/// the file system on the caller's thread. Dropping the log flushes pending
/// lines before returning.
#[derive(Debug)]
pub struct FileDebugLog {
    path: PathBuf,
    sender: Option<Sender<String>>,
    writer: Option<JoinHandle<()>>,
}

impl FileDebugLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = mpsc::channel();

        let writer_path = path.clone();
        let spawned = thread::Builder::new()
            .name(String::from("debug-log-writer"))
            .spawn(move || write_lines(&writer_path, receiver));

        match spawned {
            Ok(writer) => Self {
                path,
                sender: Some(sender),
                writer: Some(writer),
            },
            Err(e) => {
                warn!("Debug log disabled, writer thread failed to start: {e}");
                Self {
                    path,
                    sender: None,
                    writer: None,
                }
            }
        }
    }

    /// Log to [`DEBUG_LOG_FILE_NAME`] in the current working directory.
    pub fn in_working_directory() -> Self {
        Self::new(DEBUG_LOG_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `[timestamp] Type: <severity> | Operation: <operation> | Data: <payload>`
    pub fn format_line(
        timestamp: SystemTime,
        severity: Severity,
        operation: &str,
        payload: &Value,
    ) -> String {
        let data = match payload {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        format!(
            "[{}] Type: {severity} | Operation: {operation} | Data: {data}",
            format_rfc3339(timestamp)
        )
    }
}

impl DebugLog for FileDebugLog {
    fn record(&self, severity: Severity, operation: &str, payload: &Value) {
        let Some(sender) = &self.sender else {
            return;
        };

        let line = Self::format_line(SystemTime::now(), severity, operation, payload);
        // Only fails once the writer is gone
        let _ = sender.send(line);
    }
}

impl Drop for FileDebugLog {
    fn drop(&mut self) {
        // Closing the channel ends the writer loop after the queued lines
        drop(self.sender.take());

        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                warn!("Debug log writer for {} panicked", self.path.display());
            }
        }
    }
}

fn write_lines(path: &Path, receiver: Receiver<String>) {
    let mut failure_reported = false;

    for line in receiver {
        if let Err(e) = append(path, &line) {
            // Report once; further failures stay silent
            if !failure_reported {
                failure_reported = true;
                warn!("Failed to write debug log {}: {e}", path.display());
            }
        }
    }
}

fn append(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = fern::log_file(path)?;
    writeln!(file, "{line}")
}
