//! Key-value settings the guard reads its lists and switches from.
//!
//! # Keys
//!
//! - `wmfo_black_list_*` - the six blacklists, newline separated
//! - `wmfo_allow_blacklist_by_name` - `yes` enables name matching (default: `no`)
//! - `wmfo_black_list_message` - message shown to blocked shoppers
//! - `wmfo_enable_debug_log` - `yes` enables the file sink (default: `no`)
//! - `wmfo_enable_db_log` - `no` disables the table sink (default: `yes`)
//! - `wmfo_black_list_allowed_fraud_attempts` - failed payments allowed per
//!   order before its customer is blacklisted (default: `5`)

use std::collections::BTreeMap;

use thiserror::Error;

use crate::attempt_log::LoggingFlags;

pub const MATCH_BY_NAME_KEY: &str = "wmfo_allow_blacklist_by_name";
pub const BLOCKED_MESSAGE_KEY: &str = "wmfo_black_list_message";
pub const FILE_LOG_KEY: &str = "wmfo_enable_debug_log";
pub const TABLE_LOG_KEY: &str = "wmfo_enable_db_log";
pub const ALLOWED_ATTEMPTS_KEY: &str = "wmfo_black_list_allowed_fraud_attempts";

/// Failed attempts allowed per order when none (or zero) is configured.
pub const DEFAULT_ALLOWED_ATTEMPTS: u32 = 5;

/// Shown to blocked shoppers when no message is configured.
pub const DEFAULT_BLOCKED_MESSAGE: &str = "Sorry, You are being restricted from placing orders.";

/// Errors raised by a settings backend.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("settings backend error: {0}")]
    Backend(String),
}

/// A string key-value store.
pub trait SettingsStore {
    /// Read a value, `None` when the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the backend cannot persist the value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Settings held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `pairs`.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// All stored values, ordered by key.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The switches and texts the guard reads for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardSettings {
    /// Whether full names are matched at all.
    pub match_by_name: bool,
    /// Message shown to a blocked shopper.
    pub blocked_message: String,
    /// Which attempt-log sinks are enabled.
    pub logging: LoggingFlags,
    /// Failed attempts tolerated per order; the next one blacklists.
    pub allowed_attempts: u32,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            match_by_name: false,
            blocked_message: DEFAULT_BLOCKED_MESSAGE.to_owned(),
            logging: LoggingFlags::default(),
            allowed_attempts: DEFAULT_ALLOWED_ATTEMPTS,
        }
    }
}

impl GuardSettings {
    /// Read the current values, falling back to defaults for missing keys.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let blocked_message = store
            .get(BLOCKED_MESSAGE_KEY)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BLOCKED_MESSAGE.to_owned());
        let allowed_attempts = store
            .get(ALLOWED_ATTEMPTS_KEY)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_ALLOWED_ATTEMPTS);

        Self {
            match_by_name: store.get(MATCH_BY_NAME_KEY).as_deref() == Some("yes"),
            blocked_message,
            logging: LoggingFlags {
                file: store.get(FILE_LOG_KEY).as_deref() == Some("yes"),
                table: store.get(TABLE_LOG_KEY).as_deref() != Some("no"),
            },
            allowed_attempts,
        }
    }
}
