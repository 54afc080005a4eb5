//! Per-day log files of blocked attempts.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use super::BlockedAttemptLogEntry;

/// Customer fields of an entry, as dumped into the file block.
#[derive(Serialize)]
struct CustomerDetails<'a> {
    full_name: &'a str,
    ip_address: &'a str,
    billing_phone: &'a str,
    billing_email: &'a str,
    billing_address: &'a str,
    shipping_address: &'a str,
}

impl<'a> From<&'a BlockedAttemptLogEntry> for CustomerDetails<'a> {
    fn from(entry: &'a BlockedAttemptLogEntry) -> Self {
        Self {
            full_name: &entry.full_name,
            ip_address: &entry.ip,
            billing_phone: &entry.phone,
            billing_email: &entry.email,
            billing_address: &entry.billing_address,
            shipping_address: &entry.shipping_address,
        }
    }
}

/// Appends attempt blocks to `blocked-attempts-YYYY-MM-DD.log` files in one
/// directory, starting a new file each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Write files into `dir`, creating it on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file attempts logged on `date` go to.
    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("blocked-attempts-{}.log", date.format("%Y-%m-%d")))
    }

    /// Append `entry`, logging instead of failing if the write fails.
    pub fn append(&self, entry: &BlockedAttemptLogEntry) {
        if let Err(error) = self.try_append(entry) {
            tracing::warn!(
                dir = %self.dir.display(),
                %error,
                "failed to write blocked attempt to log file"
            );
        }
    }

    fn try_append(&self, entry: &BlockedAttemptLogEntry) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(entry.timestamp.date());
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(render_block(entry)?.as_bytes())
    }
}

fn render_block(entry: &BlockedAttemptLogEntry) -> io::Result<String> {
    let details = serde_json::to_string_pretty(&CustomerDetails::from(entry))?;
    Ok(format!(
        "----------start------------\n\
         Customer Details ==>\n\
         {details}\n\
         Block type ==> {reason}\n\
         Timestamp ==> {timestamp}\n\
         ----------end------------\n\n\n",
        reason = entry.blacklisted_reason,
        timestamp = entry.formatted_timestamp(),
    ))
}
