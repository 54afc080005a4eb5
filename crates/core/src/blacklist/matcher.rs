//! Screening a customer against the blacklists.

use serde::{Deserialize, Serialize};

use super::{BlacklistSet, NormalizedAddress};
use crate::country::CountryTable;
use crate::types::{BlacklistCategory, CustomerRecord};

/// Result of screening one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "category")]
pub enum MatchOutcome {
    /// No list matched.
    Clear,
    /// The first list, in priority order, that matched.
    Blacklisted(BlacklistCategory),
}

impl MatchOutcome {
    /// Returns true if any list matched.
    #[must_use]
    pub const fn is_blacklisted(self) -> bool {
        matches!(self, Self::Blacklisted(_))
    }

    /// The matching category, if any.
    #[must_use]
    pub const fn category(self) -> Option<BlacklistCategory> {
        match self {
            Self::Clear => None,
            Self::Blacklisted(category) => Some(category),
        }
    }
}

/// Checks customers against one snapshot of the lists.
///
/// Lists are checked in priority order and the first hit wins:
/// full name (only when name matching is enabled), IP address, billing email,
/// email domain, billing phone, then billing/shipping address.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    lists: &'a BlacklistSet,
    countries: &'a CountryTable,
    match_by_name: bool,
}

impl<'a> Matcher<'a> {
    #[must_use]
    pub const fn new(lists: &'a BlacklistSet, countries: &'a CountryTable) -> Self {
        Self {
            lists,
            countries,
            match_by_name: false,
        }
    }

    /// Enable or disable full-name matching. Off by default.
    #[must_use]
    pub const fn match_by_name(mut self, enabled: bool) -> Self {
        self.match_by_name = enabled;
        self
    }

    /// Screen `customer`, returning the first matching list.
    #[must_use]
    pub fn check(&self, customer: &CustomerRecord) -> MatchOutcome {
        let scalar_checks = [
            (BlacklistCategory::FullName, Some(customer.full_name.as_str())),
            (BlacklistCategory::IpAddress, Some(customer.ip_address.as_str())),
            (BlacklistCategory::BillingEmail, Some(customer.billing_email.as_str())),
            (BlacklistCategory::EmailDomain, customer.email_domain()),
            (BlacklistCategory::BillingPhone, Some(customer.billing_phone.as_str())),
        ];

        for (category, value) in scalar_checks {
            if category == BlacklistCategory::FullName && !self.match_by_name {
                continue;
            }
            if value.is_some_and(|v| self.lists.contains(category, v)) {
                return MatchOutcome::Blacklisted(category);
            }
        }

        if self.matches_address(customer) {
            return MatchOutcome::Blacklisted(BlacklistCategory::Address);
        }

        MatchOutcome::Clear
    }

    fn matches_address(&self, customer: &CustomerRecord) -> bool {
        let entries = self.lists.entries(BlacklistCategory::Address);
        if entries.is_empty() {
            return false;
        }

        let billing = NormalizedAddress::from_address(&customer.billing_address, self.countries);
        let shipping = customer
            .shipping_address
            .as_ref()
            .map(|a| NormalizedAddress::from_address(a, self.countries));

        entries.iter().any(|entry| {
            let pattern = NormalizedAddress::pattern(entry, self.countries);
            billing.contains_all(&pattern)
                || shipping.as_ref().is_some_and(|s| s.contains_all(&pattern))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;

    fn customer() -> CustomerRecord {
        CustomerRecord {
            full_name: "Jane Doe".into(),
            ip_address: "1.2.3.4".into(),
            billing_phone: "555-0100".into(),
            billing_email: "foo@spam.com".into(),
            billing_address: Address::new(["1 Main St", "Springfield", "IL", "62701", "US"]),
            shipping_address: Some(Address::new(["9 Rue Lepic", "Paris", "", "75018", "FR"])),
        }
    }

    fn check(lists: &BlacklistSet, customer: &CustomerRecord) -> MatchOutcome {
        Matcher::new(lists, &CountryTable::bundled()).check(customer)
    }

    #[test]
    fn test_empty_lists_are_clear() {
        let lists = BlacklistSet::default();
        let outcome = Matcher::new(&lists, &CountryTable::bundled())
            .match_by_name(true)
            .check(&customer());
        assert_eq!(outcome, MatchOutcome::Clear);
        assert!(!outcome.is_blacklisted());
    }

    #[test]
    fn test_ip_match() {
        let lists = BlacklistSet::from_entries([(BlacklistCategory::IpAddress, "1.2.3.4")]);
        let outcome = check(&lists, &customer());
        assert_eq!(outcome.category(), Some(BlacklistCategory::IpAddress));
    }

    #[test]
    fn test_ip_wins_over_email() {
        let lists = BlacklistSet::from_entries([
            (BlacklistCategory::BillingEmail, "foo@spam.com"),
            (BlacklistCategory::IpAddress, "9.9.9.9\n1.2.3.4"),
        ]);
        assert_eq!(
            check(&lists, &customer()),
            MatchOutcome::Blacklisted(BlacklistCategory::IpAddress)
        );
    }

    #[test]
    fn test_name_only_when_enabled() {
        let lists = BlacklistSet::from_entries([
            (BlacklistCategory::FullName, "Jane Doe"),
            (BlacklistCategory::BillingPhone, "555-0100"),
        ]);
        assert_eq!(
            check(&lists, &customer()).category(),
            Some(BlacklistCategory::BillingPhone)
        );

        let outcome = Matcher::new(&lists, &CountryTable::bundled())
            .match_by_name(true)
            .check(&customer());
        assert_eq!(outcome.category(), Some(BlacklistCategory::FullName));
    }

    #[test]
    fn test_domain_match() {
        let lists = BlacklistSet::from_entries([(BlacklistCategory::EmailDomain, "spam.com")]);
        assert_eq!(
            check(&lists, &customer()).category(),
            Some(BlacklistCategory::EmailDomain)
        );

        let mut other = customer();
        other.billing_email = "foo@notspam.com".into();
        assert_eq!(check(&lists, &other), MatchOutcome::Clear);
    }

    #[test]
    fn test_email_is_exact() {
        let lists = BlacklistSet::from_entries([(BlacklistCategory::BillingEmail, "FOO@spam.com")]);
        assert_eq!(check(&lists, &customer()), MatchOutcome::Clear);
    }

    #[test]
    fn test_country_only_address() {
        let lists = BlacklistSet::from_entries([(BlacklistCategory::Address, ",,,,US")]);
        assert_eq!(
            check(&lists, &customer()).category(),
            Some(BlacklistCategory::Address)
        );
    }

    #[test]
    fn test_shipping_address_match() {
        let lists =
            BlacklistSet::from_entries([(BlacklistCategory::Address, "9 rue lepic,paris,France")]);
        assert_eq!(
            check(&lists, &customer()).category(),
            Some(BlacklistCategory::Address)
        );

        let mut no_shipping = customer();
        no_shipping.shipping_address = None;
        assert_eq!(check(&lists, &no_shipping), MatchOutcome::Clear);
    }

    #[test]
    fn test_empty_candidate_values_never_match() {
        let lists = BlacklistSet::from_entries([(BlacklistCategory::IpAddress, "1.2.3.4")]);
        assert_eq!(check(&lists, &CustomerRecord::default()), MatchOutcome::Clear);
    }
}
