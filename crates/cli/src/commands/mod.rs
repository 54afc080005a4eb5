//! CLI command implementations.

pub mod blacklist;
pub mod inspect;

use std::fs;
use std::path::Path;

use fraud_guard_core::{
    AttemptLogger, CustomerRecord, FileSink, FraudGuard, GuardError, JsonlLogTable, LogError,
    SettingsError,
};
use thiserror::Error;

use crate::config::CliConfig;
use crate::settings_file::JsonFileSettings;

/// The guard as the CLI wires it: file settings, JSON-lines table.
pub type CliGuard = FraudGuard<JsonFileSettings, JsonlLogTable>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Settings file could not be read or written.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Attempt log could not be read or written.
    #[error("Attempt log error: {0}")]
    Log(#[from] LogError),

    /// Guard workflow failed.
    #[error("Guard error: {0}")]
    Guard(#[from] GuardError),

    /// Customer file could not be read.
    #[error("Could not read customer file {path}: {source}")]
    CustomerFile {
        path: String,
        source: std::io::Error,
    },

    /// Customer file is not a valid customer record.
    #[error("Invalid customer file {path}: {source}")]
    InvalidCustomer {
        path: String,
        source: serde_json::Error,
    },

    /// Unknown settings key.
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),
}

/// Build a guard from the CLI configuration.
///
/// # Errors
///
/// Returns `CommandError::Settings` if the settings file cannot be opened.
pub fn open_guard(config: &CliConfig) -> Result<CliGuard, CommandError> {
    let settings = JsonFileSettings::open(&config.settings_path)?;
    let logger = AttemptLogger::new(JsonlLogTable::new(&config.log_table_path))
        .with_file_sink(FileSink::new(&config.log_dir));

    tracing::debug!(
        settings = %settings.path().display(),
        table = %config.log_table_path.display(),
        "opened guard"
    );
    Ok(FraudGuard::new(settings, logger))
}

/// Read a customer record from a JSON file.
///
/// # Errors
///
/// Returns `CommandError::CustomerFile` or `CommandError::InvalidCustomer`.
pub fn read_customer(path: &Path) -> Result<CustomerRecord, CommandError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| CommandError::CustomerFile {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CommandError::InvalidCustomer {
        path: display,
        source,
    })
}
