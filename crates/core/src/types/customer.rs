//! Customer snapshot types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Separator between parts of a flattened address.
pub const ADDRESS_SEPARATOR: char = ',';

/// `value` with every line break removed.
///
/// List blocks are newline separated, so a single customer value must never
/// span lines.
#[must_use]
pub fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], "")
}

/// A postal address as ordered parts.
///
/// Parts conventionally follow `[street, city, state, postcode, country]`,
/// but matching never relies on positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Vec<String>);

impl Address {
    /// Create an address from its parts.
    #[must_use]
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Split a flattened (comma separated) address into parts.
    #[must_use]
    pub fn parse(flat: &str) -> Self {
        Self::new(flat.split(ADDRESS_SEPARATOR))
    }

    /// The address parts in order.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Returns true if no part carries any text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|p| p.trim().is_empty())
    }

    /// Join the parts with commas, the form stored in the address blacklist.
    ///
    /// Line breaks inside parts are dropped.
    #[must_use]
    pub fn flatten(&self) -> String {
        self.0
            .iter()
            .map(|part| single_line(part))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

/// The customer details a checkout is screened against.
///
/// Built by the caller from an order or a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerRecord {
    pub full_name: String,
    pub ip_address: String,
    pub billing_phone: String,
    pub billing_email: String,
    pub billing_address: Address,
    pub shipping_address: Option<Address>,
}

impl CustomerRecord {
    /// Returns true if the record carries no identifying detail at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.trim().is_empty()
            && self.ip_address.trim().is_empty()
            && self.billing_phone.trim().is_empty()
            && self.billing_email.trim().is_empty()
            && self.billing_address.is_blank()
            && self.shipping_address.as_ref().is_none_or(Address::is_blank)
    }

    /// The part of the billing email after the first `@`.
    #[must_use]
    pub fn email_domain(&self) -> Option<&str> {
        self.billing_email
            .split_once('@')
            .map(|(_, domain)| domain.trim())
            .filter(|domain| !domain.is_empty())
    }

    /// Flattened shipping address, empty when none was given.
    #[must_use]
    pub fn shipping_flat(&self) -> String {
        self.shipping_address
            .as_ref()
            .map(Address::flatten)
            .unwrap_or_default()
    }

    /// Billing and shipping addresses as a newline separated block.
    ///
    /// Identical addresses appear once; blank ones not at all.
    #[must_use]
    pub fn address_entries(&self) -> String {
        let mut entries: Vec<String> = Vec::with_capacity(2);
        let candidates = std::iter::once(&self.billing_address).chain(&self.shipping_address);
        for address in candidates.filter(|a| !a.is_blank()) {
            let flat = address.flatten();
            if !entries.contains(&flat) {
                entries.push(flat);
            }
        }
        entries.join("\n")
    }
}
