//! Timestamped trail of one generation run.
//!
//! Every [`RunLog::record`] rewrites the whole log file, so a run that dies
//! halfway still leaves a readable trail, and each run starts the file over.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use log::{info, warn};

use crate::output::write_atomic;

/// Log file used when the config names none.
pub const DEFAULT_LOG_FILE: &str = "logs.txt";

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    /// `2024-01-05T09:30:00.123+01:00: message`
    pub fn line(&self) -> String {
        format!(
            "{}: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
            self.message
        )
    }
}

#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Append a message and rewrite the log file.
    ///
    /// A log file that cannot be written is reported at `warn`; the entry is
    /// kept in memory and the next flush tries again.
    pub fn record(&mut self, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Local::now(),
            message: message.into(),
        };
        info!("{}", entry.message);
        self.entries.push(entry);
        if let Err(e) = self.flush() {
            warn!("failed to write run log {}: {e}", self.path.display());
        }
    }

    /// All entries, one `timestamp: message` per entry, joined by newlines.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(LogEntry::line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn flush(&self) -> io::Result<()> {
        write_atomic(&self.path, &self.render())
    }
}
