//! Blacklist categories and block reasons.

use serde::{Deserialize, Serialize};

/// One of the six blacklists an operator maintains.
///
/// Declaration order is the matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlacklistCategory {
    FullName,
    IpAddress,
    BillingEmail,
    EmailDomain,
    BillingPhone,
    Address,
}

impl BlacklistCategory {
    /// Every category, in matching priority order.
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::IpAddress,
        Self::BillingEmail,
        Self::EmailDomain,
        Self::BillingPhone,
        Self::Address,
    ];

    /// Settings key the list is persisted under.
    #[must_use]
    pub const fn settings_key(self) -> &'static str {
        match self {
            Self::FullName => "wmfo_black_list_names",
            Self::IpAddress => "wmfo_black_list_ips",
            Self::BillingEmail => "wmfo_black_list_emails",
            Self::EmailDomain => "wmfo_black_list_email_domains",
            Self::BillingPhone => "wmfo_black_list_phones",
            Self::Address => "wmfo_black_list_addresses",
        }
    }

    /// Operator-facing label, as written to the attempt log.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::IpAddress => "IP Address",
            Self::BillingEmail => "Billing Email",
            Self::EmailDomain => "Email Domain",
            Self::BillingPhone => "Billing Phone",
            Self::Address => "Billing/Shipping Address",
        }
    }

    /// Whether entries in this list compare without regard to case.
    #[must_use]
    pub const fn is_case_insensitive(self) -> bool {
        matches!(self, Self::EmailDomain | Self::Address)
    }
}

impl std::fmt::Display for BlacklistCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BlacklistCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "names" | "full_name" => Ok(Self::FullName),
            "ips" | "ip_address" => Ok(Self::IpAddress),
            "emails" | "billing_email" => Ok(Self::BillingEmail),
            "domains" | "email_domain" => Ok(Self::EmailDomain),
            "phones" | "billing_phone" => Ok(Self::BillingPhone),
            "addresses" | "address" => Ok(Self::Address),
            _ => Err(format!("invalid blacklist category: {s}")),
        }
    }
}

/// Why an attempt was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The customer matched an entry in this list.
    Blacklisted(BlacklistCategory),
    /// The customer was blacklisted during checkout after too many failed
    /// payment attempts.
    MaxFraudAttempts,
}

impl BlockReason {
    /// Operator-facing label, as written to the attempt log.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blacklisted(category) => category.label(),
            Self::MaxFraudAttempts => "Max Fraud Attempts exceeded",
        }
    }
}

impl From<BlacklistCategory> for BlockReason {
    fn from(category: BlacklistCategory) -> Self {
        Self::Blacklisted(category)
    }
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
