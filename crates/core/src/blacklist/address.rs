//! Address normalization and subset matching.

use crate::country::CountryTable;
use crate::types::Address;

/// An address reduced to its normalized parts.
///
/// Each part is trimmed and lowercased, and country names are folded to their
/// code, so `"United States"`, `"US"` and `" us "` all compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress {
    parts: Vec<String>,
}

impl NormalizedAddress {
    /// Normalize a customer address. Empty parts are kept.
    #[must_use]
    pub fn from_address(address: &Address, countries: &CountryTable) -> Self {
        Self {
            parts: address
                .parts()
                .iter()
                .map(|p| countries.normalize_part(p))
                .collect(),
        }
    }

    /// Normalize a flattened blacklist entry. Empty parts are dropped, since
    /// they only mean "any value".
    #[must_use]
    pub fn pattern(entry: &str, countries: &CountryTable) -> Self {
        Self {
            parts: Address::parse(entry)
                .parts()
                .iter()
                .map(|p| countries.normalize_part(p))
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// The normalized parts.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns true if every part of `pattern` appears somewhere in `self`.
    ///
    /// A pattern with no parts matches nothing.
    #[must_use]
    pub fn contains_all(&self, pattern: &Self) -> bool {
        !pattern.parts.is_empty() && pattern.parts.iter().all(|p| self.parts.contains(p))
    }
}
