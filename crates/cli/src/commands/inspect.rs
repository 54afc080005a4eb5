//! Reading the blacklists and attempt log, and editing switches.
//!
//! # Usage
//!
//! ```bash
//! fg-cli lists
//! fg-cli lists emails
//! fg-cli logs --limit 20
//! fg-cli set wmfo_enable_debug_log yes
//! ```

use fraud_guard_core::settings::{
    ALLOWED_ATTEMPTS_KEY, BLOCKED_MESSAGE_KEY, FILE_LOG_KEY, MATCH_BY_NAME_KEY, TABLE_LOG_KEY,
};
use fraud_guard_core::{BlacklistCategory, LogRow, LogTable, SettingsStore};

use super::{CliGuard, CommandError};

const SWITCH_KEYS: [&str; 5] = [
    MATCH_BY_NAME_KEY,
    BLOCKED_MESSAGE_KEY,
    FILE_LOG_KEY,
    TABLE_LOG_KEY,
    ALLOWED_ATTEMPTS_KEY,
];

/// Collect the entries of one list, or of every list.
pub fn lists(
    guard: &CliGuard,
    category: Option<BlacklistCategory>,
) -> Vec<(BlacklistCategory, Vec<String>)> {
    let set = guard.blacklists();
    let categories = category.map_or_else(|| BlacklistCategory::ALL.to_vec(), |c| vec![c]);

    categories
        .into_iter()
        .map(|c| (c, set.entries(c).to_vec()))
        .collect()
}

/// Most recent `limit` rows of the attempt table, newest first.
///
/// # Errors
///
/// Returns `CommandError::Log` if the table cannot be read.
pub fn logs(guard: &CliGuard, limit: usize) -> Result<Vec<LogRow>, CommandError> {
    let mut rows = guard.logger().table().rows()?;
    rows.reverse();
    rows.truncate(limit);
    Ok(rows)
}

/// Write one setting. Only list and switch keys are accepted.
///
/// # Errors
///
/// Returns `CommandError::UnknownKey` for any other key, or
/// `CommandError::Settings` if the write fails.
pub fn set(guard: &mut CliGuard, key: &str, value: &str) -> Result<(), CommandError> {
    let known = SWITCH_KEYS.contains(&key)
        || BlacklistCategory::ALL
            .iter()
            .any(|c| c.settings_key() == key);
    if !known {
        return Err(CommandError::UnknownKey(key.to_string()));
    }

    guard.settings_mut().set(key, value)?;
    tracing::info!(key, "Setting updated");
    Ok(())
}
