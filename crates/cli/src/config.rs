//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FRAUD_GUARD_SETTINGS_PATH` - JSON settings file (default: `fraud-guard.json`)
//! - `FRAUD_GUARD_LOG_DIR` - Directory for daily attempt log files (default: `wmfo-logs`)
//! - `FRAUD_GUARD_LOG_TABLE` - JSON-lines attempt table (default: `<log dir>/blocked-attempts.jsonl`)
//! - `FRAUD_GUARD_LOG_JSON` - Emit tracing output as JSON when set
//! - `RUST_LOG` - Tracing filter (default: `fraud_guard_core=info,fraud_guard_cli=info`)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_SETTINGS_PATH: &str = "fraud-guard.json";
const DEFAULT_LOG_DIR: &str = "wmfo-logs";
const DEFAULT_LOG_TABLE_FILE: &str = "blocked-attempts.jsonl";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// JSON file holding the settings store
    pub settings_path: PathBuf,
    /// Directory the file sink writes into
    pub log_dir: PathBuf,
    /// JSON-lines file backing the log table
    pub log_table_path: PathBuf,
    /// Whether tracing output is JSON
    pub json_logs: bool,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings_path = get_path(&lookup, "FRAUD_GUARD_SETTINGS_PATH")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        let log_dir = get_path(&lookup, "FRAUD_GUARD_LOG_DIR")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        let log_table_path = get_path(&lookup, "FRAUD_GUARD_LOG_TABLE")?
            .unwrap_or_else(|| log_dir.join(DEFAULT_LOG_TABLE_FILE));
        let json_logs = lookup("FRAUD_GUARD_LOG_JSON").is_some();

        Ok(Self {
            settings_path,
            log_dir,
            log_table_path,
            json_logs,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional path variable, rejecting blank values.
fn get_path<F>(lookup: &F, key: &str) -> Result<Option<PathBuf>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "path cannot be empty".to_string(),
        )),
        Some(value) => Ok(Some(PathBuf::from(value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(config.settings_path, PathBuf::from("fraud-guard.json"));
        assert_eq!(config.log_dir, PathBuf::from("wmfo-logs"));
        assert_eq!(
            config.log_table_path,
            PathBuf::from("wmfo-logs/blocked-attempts.jsonl")
        );
        assert!(!config.json_logs);
    }

    #[test]
    fn test_table_follows_log_dir() {
        let config = CliConfig::from_lookup(lookup(&[("FRAUD_GUARD_LOG_DIR", "/var/log/fg")]))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            config.log_table_path,
            PathBuf::from("/var/log/fg/blocked-attempts.jsonl")
        );
    }

    #[test]
    fn test_explicit_values() {
        let config = CliConfig::from_lookup(lookup(&[
            ("FRAUD_GUARD_SETTINGS_PATH", "/etc/fg.json"),
            ("FRAUD_GUARD_LOG_TABLE", "/data/attempts.jsonl"),
            ("FRAUD_GUARD_LOG_JSON", "1"),
        ]))
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(config.settings_path, PathBuf::from("/etc/fg.json"));
        assert_eq!(config.log_table_path, PathBuf::from("/data/attempts.jsonl"));
        assert!(config.json_logs);
    }

    #[test]
    fn test_blank_path_rejected() {
        let result = CliConfig::from_lookup(lookup(&[("FRAUD_GUARD_LOG_DIR", "  ")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "FRAUD_GUARD_LOG_DIR"
        ));
    }
}
