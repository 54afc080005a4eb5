//! Integration tests for Fraud Guard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fraud-guard-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_blocking` - Screening customers against stored lists
//! - `blacklist_updates` - Operator actions, orders and notices
//! - `attempt_logging` - File and table sinks on disk
//!
//! Every test runs against a fresh temporary directory; nothing outside it
//! is touched.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use fraud_guard_core::{
    Address, AttemptLogger, CustomerRecord, FileSink, FraudGuard, JsonlLogTable, MemorySettings,
};

/// A guard wired to in-memory settings and on-disk log sinks.
pub type DiskGuard = FraudGuard<MemorySettings, JsonlLogTable>;

/// Build a guard whose table and daily log files live under `dir`.
#[must_use]
pub fn disk_guard(dir: &Path, settings: MemorySettings) -> DiskGuard {
    let logger = AttemptLogger::new(JsonlLogTable::new(dir.join("attempts.jsonl")))
        .with_file_sink(FileSink::new(dir.join("logs")));
    FraudGuard::new(settings, logger)
}

/// Settings with a single key populated.
#[must_use]
pub fn settings_with(key: &str, value: &str) -> MemorySettings {
    MemorySettings::from_pairs([(key, value)])
}

/// Builder for customer records used across the suites.
#[derive(Debug, Clone, Default)]
pub struct CustomerBuilder {
    record: CustomerRecord,
}

impl CustomerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A customer with every detail filled in.
    #[must_use]
    pub fn jane() -> Self {
        Self::new()
            .name("Jane Doe")
            .ip("203.0.113.7")
            .email("jane@example.com")
            .phone("555-0100")
            .billing(["1 Main St", "", "Springfield", "IL", "62701", "United States"])
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.record.full_name = name.to_owned();
        self
    }

    #[must_use]
    pub fn ip(mut self, ip: &str) -> Self {
        self.record.ip_address = ip.to_owned();
        self
    }

    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.record.billing_email = email.to_owned();
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: &str) -> Self {
        self.record.billing_phone = phone.to_owned();
        self
    }

    #[must_use]
    pub fn billing<const N: usize>(mut self, parts: [&str; N]) -> Self {
        self.record.billing_address = Address::new(parts);
        self
    }

    #[must_use]
    pub fn shipping<const N: usize>(mut self, parts: [&str; N]) -> Self {
        self.record.shipping_address = Some(Address::new(parts));
        self
    }

    #[must_use]
    pub fn build(self) -> CustomerRecord {
        self.record
    }
}
