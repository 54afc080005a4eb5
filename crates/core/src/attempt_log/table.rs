//! Row-per-attempt log tables.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BlockedAttemptLogEntry, LogError};
use crate::types::LogEntryId;

/// A stored attempt with its row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRow {
    pub id: LogEntryId,
    #[serde(flatten)]
    pub entry: BlockedAttemptLogEntry,
}

/// Append-only storage for blocked attempts.
pub trait LogTable {
    /// Append one row, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `LogError` if the row cannot be stored.
    fn insert(&mut self, entry: &BlockedAttemptLogEntry) -> Result<LogEntryId, LogError>;

    /// All rows in insertion order, for admin list views.
    ///
    /// # Errors
    ///
    /// Returns `LogError` if the rows cannot be read.
    fn rows(&self) -> Result<Vec<LogRow>, LogError>;
}

/// A log table held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogTable {
    rows: Vec<LogRow>,
}

impl MemoryLogTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored rows.
    #[must_use]
    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }
}

impl LogTable for MemoryLogTable {
    fn insert(&mut self, entry: &BlockedAttemptLogEntry) -> Result<LogEntryId, LogError> {
        let id = self
            .rows
            .last()
            .map_or(LogEntryId::new(1), |row| row.id.next());
        self.rows.push(LogRow {
            id,
            entry: entry.clone(),
        });
        Ok(id)
    }

    fn rows(&self) -> Result<Vec<LogRow>, LogError> {
        Ok(self.rows.clone())
    }
}

/// A log table stored as one JSON object per line.
///
/// Ids continue from the highest id in the file, so the file can be shared
/// by successive processes. A missing file is an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonlLogTable {
    path: PathBuf,
}

impl JsonlLogTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<LogRow>, LogError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(LogError::from))
            .collect()
    }
}

impl LogTable for JsonlLogTable {
    fn insert(&mut self, entry: &BlockedAttemptLogEntry) -> Result<LogEntryId, LogError> {
        let id = self
            .read_rows()?
            .iter()
            .map(|row| row.id)
            .max()
            .map_or(LogEntryId::new(1), |max| max.next());

        let row = LogRow {
            id,
            entry: entry.clone(),
        };
        let mut line = serde_json::to_string(&row)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        Ok(id)
    }

    fn rows(&self) -> Result<Vec<LogRow>, LogError> {
        self.read_rows()
    }
}
