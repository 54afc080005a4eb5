//! Fraud Guard Core - checkout blacklisting library.
//!
//! Blocks checkouts from customers whose name, IP, email, email domain,
//! phone or address is on an operator-maintained blacklist, cancels their
//! orders and logs every blocked attempt.
//!
//! # Architecture
//!
//! Everything runs synchronously inside one request. The host application
//! supplies the collaborators through traits:
//!
//! - [`SettingsStore`] - where the lists and switches live
//! - [`Order`] - the order being blacklisted or cancelled
//! - [`NoticeSurface`] - messages shown to the shopper
//! - [`LogTable`] - durable storage for blocked attempts
//!
//! # Modules
//!
//! - [`types`] - Customer records, categories, statuses and IDs
//! - [`settings`] - Settings keys, store trait and [`GuardSettings`]
//! - [`country`] - Country name to code folding for address matching
//! - [`blacklist`] - List updates and the [`Matcher`]
//! - [`attempt_log`] - File and table sinks for blocked attempts
//! - [`order`] / [`notice`] - Collaborator traits with in-memory versions
//! - [`guard`] - The [`FraudGuard`] workflow
//! - [`attempts`] - Failed payment counting that escalates to a blacklist

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod attempt_log;
pub mod attempts;
pub mod blacklist;
pub mod country;
pub mod guard;
pub mod notice;
pub mod order;
pub mod settings;
pub mod types;

pub use attempt_log::{
    AttemptLogger, BlockedAttemptLogEntry, FileSink, JsonlLogTable, LogError, LogRow, LogTable,
    LoggingFlags, MemoryLogTable,
};
pub use attempts::AttemptOutcome;
pub use blacklist::{BlacklistSet, BlacklistStore, MatchOutcome, Matcher};
pub use country::CountryTable;
pub use guard::{ActionOutcome, FraudGuard, GuardError};
pub use notice::{NoticeQueue, NoticeSurface};
pub use order::{MemoryOrder, Order, OrderError, OrderNotes};
pub use settings::{GuardSettings, MemorySettings, SettingsError, SettingsStore};
pub use types::*;
