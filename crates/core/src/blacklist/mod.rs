//! Blacklist storage and matching.
//!
//! Each of the six lists is persisted as one newline separated string under
//! its own settings key (see [`BlacklistCategory::settings_key`]). Lists are
//! read fresh for every evaluation and written back after every mutation.
//!
//! # Entry comparison
//!
//! Names, IPs, emails and phones compare exactly. Domains and addresses
//! compare without regard to case.
//!
//! # Concurrency
//!
//! The read-modify-write in [`BlacklistStore::apply`] takes no lock. Two
//! writers racing on the same key lose one update.

pub mod address;
pub mod matcher;

pub use address::NormalizedAddress;
pub use matcher::{MatchOutcome, Matcher};

use crate::settings::{SettingsError, SettingsStore};
use crate::types::{BlacklistAction, BlacklistCategory};

/// Split a stored or submitted block into trimmed, non-blank entries.
fn split_entries(block: &str) -> impl Iterator<Item = &str> {
    block.lines().map(str::trim).filter(|e| !e.is_empty())
}

fn same_entry(category: BlacklistCategory, a: &str, b: &str) -> bool {
    if category.is_case_insensitive() {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

/// Apply `action` for every entry in `entries` to the `current` list value.
///
/// `entries` is a newline separated block; blank lines are ignored. Returns
/// `None` when no entries were supplied at all, meaning nothing should be
/// written. Otherwise returns the new list value, newline joined.
///
/// Adding checks each entry against the list as it grows, so a block never
/// introduces a duplicate. Removing drops every matching entry; entries that
/// are not present are ignored.
///
/// # Examples
///
/// ```
/// use fraud_guard_core::blacklist::update_list;
/// use fraud_guard_core::{BlacklistAction, BlacklistCategory};
///
/// let ips = BlacklistCategory::IpAddress;
/// let added = update_list(ips, Some("1.2.3.4"), Some("5.6.7.8\n1.2.3.4\n"), BlacklistAction::Add);
/// assert_eq!(added.as_deref(), Some("1.2.3.4\n5.6.7.8"));
///
/// let removed = update_list(ips, added.as_deref(), Some("1.2.3.4"), BlacklistAction::Remove);
/// assert_eq!(removed.as_deref(), Some("5.6.7.8"));
/// ```
#[must_use]
pub fn update_list(
    category: BlacklistCategory,
    current: Option<&str>,
    entries: Option<&str>,
    action: BlacklistAction,
) -> Option<String> {
    let entries = entries?;
    let mut list: Vec<&str> = split_entries(current.unwrap_or_default()).collect();

    match action {
        BlacklistAction::Add => {
            for entry in split_entries(entries) {
                if !list.iter().any(|existing| same_entry(category, existing, entry)) {
                    list.push(entry);
                }
            }
        }
        BlacklistAction::Remove => {
            let removals: Vec<&str> = split_entries(entries).collect();
            list.retain(|existing| !removals.iter().any(|r| same_entry(category, existing, r)));
        }
    }

    Some(list.join("\n"))
}

/// A snapshot of all six lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlacklistSet {
    names: Vec<String>,
    ips: Vec<String>,
    emails: Vec<String>,
    email_domains: Vec<String>,
    phones: Vec<String>,
    addresses: Vec<String>,
}

impl BlacklistSet {
    /// Read every list from `store`. Missing keys are empty lists.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let mut set = Self::default();
        for category in BlacklistCategory::ALL {
            if let Some(value) = store.get(category.settings_key()) {
                *set.list_mut(category) = split_entries(&value).map(str::to_owned).collect();
            }
        }
        set
    }

    /// Build a set from explicit entries, mainly for tests and previews.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (BlacklistCategory, S)>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for (category, block) in entries {
            set.list_mut(category)
                .extend(split_entries(block.as_ref()).map(str::to_owned));
        }
        set
    }

    /// Entries of one list, in insertion order.
    #[must_use]
    pub fn entries(&self, category: BlacklistCategory) -> &[String] {
        match category {
            BlacklistCategory::FullName => &self.names,
            BlacklistCategory::IpAddress => &self.ips,
            BlacklistCategory::BillingEmail => &self.emails,
            BlacklistCategory::EmailDomain => &self.email_domains,
            BlacklistCategory::BillingPhone => &self.phones,
            BlacklistCategory::Address => &self.addresses,
        }
    }

    /// Returns true if `value` is in the list, using the list's comparison.
    #[must_use]
    pub fn contains(&self, category: BlacklistCategory, value: &str) -> bool {
        let value = value.trim();
        !value.is_empty()
            && self
                .entries(category)
                .iter()
                .any(|entry| same_entry(category, entry, value))
    }

    /// Returns true if every list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        BlacklistCategory::ALL
            .iter()
            .all(|c| self.entries(*c).is_empty())
    }

    fn list_mut(&mut self, category: BlacklistCategory) -> &mut Vec<String> {
        match category {
            BlacklistCategory::FullName => &mut self.names,
            BlacklistCategory::IpAddress => &mut self.ips,
            BlacklistCategory::BillingEmail => &mut self.emails,
            BlacklistCategory::EmailDomain => &mut self.email_domains,
            BlacklistCategory::BillingPhone => &mut self.phones,
            BlacklistCategory::Address => &mut self.addresses,
        }
    }
}

/// Read-modify-write access to the persisted lists.
pub struct BlacklistStore<'a, S: SettingsStore + ?Sized> {
    settings: &'a mut S,
}

impl<'a, S: SettingsStore + ?Sized> BlacklistStore<'a, S> {
    /// Wrap a settings store.
    pub const fn new(settings: &'a mut S) -> Self {
        Self { settings }
    }

    /// Current snapshot of all lists.
    #[must_use]
    pub fn load(&self) -> BlacklistSet {
        BlacklistSet::load(&*self.settings)
    }

    /// Add or remove `entries` in one list and persist the result.
    ///
    /// Returns `true` if a value was written.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the new value cannot be persisted.
    pub fn apply(
        &mut self,
        category: BlacklistCategory,
        entries: Option<&str>,
        action: BlacklistAction,
    ) -> Result<bool, SettingsError> {
        let key = category.settings_key();
        let current = self.settings.get(key);
        let Some(updated) = update_list(category, current.as_deref(), entries, action) else {
            return Ok(false);
        };

        tracing::debug!(list = key, %action, "updating blacklist");
        self.settings.set(key, updated.trim())?;
        Ok(true)
    }
}
