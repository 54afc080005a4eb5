//! Integration tests for the blocked-attempt sinks on disk.

#![allow(clippy::unwrap_used)]

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use fraud_guard_core::settings::{FILE_LOG_KEY, TABLE_LOG_KEY};
use fraud_guard_core::{
    AttemptLogger, BlacklistCategory, BlockReason, BlockedAttemptLogEntry, FileSink,
    JsonlLogTable, LogEntryId, LogTable, LoggingFlags, MemorySettings,
};
use fraud_guard_integration_tests::{CustomerBuilder, disk_guard};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(hour, 30, 0)
        .unwrap()
}

fn entry(day: u32, hour: u32) -> BlockedAttemptLogEntry {
    BlockedAttemptLogEntry::new(
        &CustomerBuilder::jane().build(),
        BlockReason::Blacklisted(BlacklistCategory::BillingEmail),
        at(day, hour),
    )
}

#[test]
fn test_default_flags_write_one_row_and_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(dir.path().join("logs"));
    let mut logger = AttemptLogger::new(JsonlLogTable::new(dir.path().join("attempts.jsonl")))
        .with_file_sink(sink.clone());

    let id = logger.record(&entry(1, 9), LoggingFlags::default()).unwrap();

    assert_eq!(id, Some(LogEntryId::new(1)));
    assert_eq!(logger.table().rows().unwrap().len(), 1);
    assert!(!sink.path_for(at(1, 9).date()).exists());
    assert!(!dir.path().join("logs").exists());
}

#[test]
fn test_file_sink_rotates_daily() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(dir.path().join("logs"));
    let mut logger = AttemptLogger::new(JsonlLogTable::new(dir.path().join("attempts.jsonl")))
        .with_file_sink(sink.clone());
    let flags = LoggingFlags {
        file: true,
        table: false,
    };

    assert_eq!(logger.record(&entry(1, 9), flags).unwrap(), None);
    logger.record(&entry(1, 17), flags).unwrap();
    logger.record(&entry(2, 8), flags).unwrap();

    let first = fs::read_to_string(sink.path_for(at(1, 0).date())).unwrap();
    let second = fs::read_to_string(sink.path_for(at(2, 0).date())).unwrap();

    assert_eq!(first.matches("----------start------------").count(), 2);
    assert_eq!(second.matches("----------start------------").count(), 1);
    assert!(first.contains("Block type ==> Billing Email"));
    assert!(first.contains("Timestamp ==> 2024-05-01 17:30:00"));
    assert!(second.ends_with("----------end------------\n\n\n"));
    assert!(logger.table().rows().unwrap().is_empty());
}

#[test]
fn test_table_ids_continue_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("attempts.jsonl");

    let mut first = AttemptLogger::new(JsonlLogTable::new(&path));
    first.record(&entry(3, 10), LoggingFlags::default()).unwrap();
    first.record(&entry(3, 11), LoggingFlags::default()).unwrap();

    let mut reopened = AttemptLogger::new(JsonlLogTable::new(&path));
    let id = reopened
        .record(&entry(3, 12), LoggingFlags::default())
        .unwrap();
    assert_eq!(id, Some(LogEntryId::new(3)));

    let rows = reopened.table().rows().unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(rows[2].entry.timestamp, at(3, 12));
    assert_eq!(rows[0].entry.full_name, "Jane Doe");
    assert_eq!(
        rows[0].entry.billing_address,
        "1 Main St,,Springfield,IL,62701,United States"
    );
}

#[test]
fn test_table_rows_are_plain_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("attempts.jsonl");
    let mut logger = AttemptLogger::new(JsonlLogTable::new(&path));
    logger.record(&entry(4, 6), LoggingFlags::default()).unwrap();

    let line = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["blacklisted_reason"], "Billing Email");
    assert_eq!(value["email"], "jane@example.com");
}

#[test]
fn test_unwritable_file_sink_does_not_fail_checkout_logging() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the log directory should be.
    let blocked = dir.path().join("logs");
    fs::write(&blocked, "not a directory").unwrap();

    let mut logger = AttemptLogger::new(JsonlLogTable::new(dir.path().join("attempts.jsonl")))
        .with_file_sink(FileSink::new(&blocked));
    let flags = LoggingFlags {
        file: true,
        table: true,
    };

    assert_eq!(
        logger.record(&entry(5, 7), flags).unwrap(),
        Some(LogEntryId::new(1))
    );
}

#[test]
fn test_guard_reads_logging_switches() {
    let dir = tempfile::tempdir().unwrap();
    let settings = MemorySettings::from_pairs([
        (BlacklistCategory::IpAddress.settings_key(), "203.0.113.7"),
        (FILE_LOG_KEY, "yes"),
        (TABLE_LOG_KEY, "no"),
    ]);
    let mut guard = disk_guard(dir.path(), settings);

    let err = guard
        .screen_checkout(&CustomerBuilder::jane().build())
        .unwrap_err();
    assert!(err.is_rejection());

    assert!(guard.logger().table().rows().unwrap().is_empty());
    let files: Vec<_> = fs::read_dir(dir.path().join("logs")).unwrap().collect();
    assert_eq!(files.len(), 1);
}
