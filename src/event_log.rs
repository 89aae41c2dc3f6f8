//! JSON-lines session event log.
//!
//! One object per line: a millisecond timestamp plus the flattened
//! [`SessionEvent`]. Writing is best-effort: the first I/O error disables the
//! log and the game carries on.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::SessionEvent;

#[derive(Serialize)]
struct LogRecord<'a> {
    ts_ms: u64,
    #[serde(flatten)]
    event: &'a SessionEvent,
}

pub struct EventLog<W: Write = File> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(file))
    }

    /// A log that drops everything.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, event: &SessionEvent) {
        self.record_at(current_timestamp_ms(), event);
    }

    pub fn record_at(&mut self, ts_ms: u64, event: &SessionEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &LogRecord { ts_ms, event }).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
        }
    }

    /// The underlying writer, if the log is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
