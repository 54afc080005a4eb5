//! Logging of blocked checkout attempts.
//!
//! Two independent sinks:
//!
//! - [`FileSink`] - human-readable blocks appended to a per-day file. Off by
//!   default. Write failures are logged and swallowed.
//! - [`LogTable`] - one row per attempt with an auto-increment id. On by
//!   default. Write failures propagate to the caller.
//!
//! Entries are append-only; nothing here edits or deletes them.

mod file;
mod table;

pub use file::FileSink;
pub use table::{JsonlLogTable, LogRow, LogTable, MemoryLogTable};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BlockReason, CustomerRecord, LogEntryId};

/// `MySQL`-style timestamp format used in log output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised by a log table.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("log table I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log table serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("log table backend error: {0}")]
    Backend(String),
}

/// Which sinks a blocked attempt is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingFlags {
    pub file: bool,
    pub table: bool,
}

impl Default for LoggingFlags {
    fn default() -> Self {
        Self {
            file: false,
            table: true,
        }
    }
}

/// One blocked checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedAttemptLogEntry {
    pub full_name: String,
    pub phone: String,
    pub ip: String,
    pub email: String,
    /// Billing address flattened with commas.
    pub billing_address: String,
    /// Shipping address flattened with commas, empty when none was given.
    pub shipping_address: String,
    /// Label of the [`BlockReason`].
    pub blacklisted_reason: String,
    pub timestamp: NaiveDateTime,
}

impl BlockedAttemptLogEntry {
    /// Snapshot `customer` as blocked for `reason` at `timestamp`.
    #[must_use]
    pub fn new(customer: &CustomerRecord, reason: BlockReason, timestamp: NaiveDateTime) -> Self {
        Self {
            full_name: customer.full_name.clone(),
            phone: customer.billing_phone.clone(),
            ip: customer.ip_address.clone(),
            email: customer.billing_email.clone(),
            billing_address: customer.billing_address.flatten(),
            shipping_address: customer.shipping_flat(),
            blacklisted_reason: reason.label().to_owned(),
            timestamp,
        }
    }

    /// Snapshot `customer` as blocked for `reason` now, in local time.
    #[must_use]
    pub fn now(customer: &CustomerRecord, reason: BlockReason) -> Self {
        Self::new(customer, reason, Local::now().naive_local())
    }

    /// The timestamp in `YYYY-MM-DD HH:MM:SS` form.
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Writes blocked attempts to the enabled sinks.
#[derive(Debug)]
pub struct AttemptLogger<T> {
    file: Option<FileSink>,
    table: T,
}

impl<T: LogTable> AttemptLogger<T> {
    /// Create a logger writing rows to `table` and no file.
    pub const fn new(table: T) -> Self {
        Self { file: None, table }
    }

    /// Also write to `sink` when file logging is enabled.
    #[must_use]
    pub fn with_file_sink(mut self, sink: FileSink) -> Self {
        self.file = Some(sink);
        self
    }

    /// The table rows are written to.
    pub const fn table(&self) -> &T {
        &self.table
    }

    /// Record one blocked attempt.
    ///
    /// Returns the table row id when the table sink is enabled.
    ///
    /// # Errors
    ///
    /// Returns `LogError` if the table sink fails. File sink failures are
    /// logged and ignored.
    pub fn record(
        &mut self,
        entry: &BlockedAttemptLogEntry,
        flags: LoggingFlags,
    ) -> Result<Option<LogEntryId>, LogError> {
        tracing::info!(
            reason = %entry.blacklisted_reason,
            ip = %entry.ip,
            email = %entry.email,
            "blocked checkout attempt"
        );

        if flags.file {
            match &self.file {
                Some(sink) => sink.append(entry),
                None => tracing::debug!("file logging enabled but no log directory configured"),
            }
        }

        if !flags.table {
            return Ok(None);
        }

        let id = self.table.insert(entry)?;
        Ok(Some(id))
    }
}
