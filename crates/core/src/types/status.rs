//! Status and mode enums shared by the guard workflow.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Only `Cancelled` carries meaning for the guard; the rest exist so order
/// collaborators can report what they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "on-hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// What kind of order record a collaborator holds.
///
/// Only top-level orders are ever moved to `Cancelled` by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// A regular checkout order.
    #[default]
    Order,
    /// A refund attached to a parent order.
    Refund,
    /// Any other child record (renewals, split shipments, ...).
    SubOrder,
}

impl OrderKind {
    /// Returns true for top-level checkout orders.
    #[must_use]
    pub const fn is_top_level(self) -> bool {
        matches!(self, Self::Order)
    }
}

/// Direction of a blacklist mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlacklistAction {
    #[default]
    Add,
    Remove,
}

impl std::fmt::Display for BlacklistAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

impl std::str::FromStr for BlacklistAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            _ => Err(format!("invalid blacklist action: {s}")),
        }
    }
}

/// The call site that triggered a blacklist action.
///
/// Decides how a block is surfaced to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "context")]
pub enum BlockContext {
    /// Back-office action by an operator. Nothing is surfaced to a shopper.
    #[default]
    Admin,
    /// Live checkout. The attempt is logged and checkout is aborted.
    Front,
    /// Paying for an existing order. An error notice is queued.
    OrderPay,
    /// Paying for an existing order through the eWAY gateway.
    ///
    /// When the gateway called back with an access code the shopper is sent
    /// back to the order's payment page; otherwise checkout fails outright.
    OrderPayEway {
        /// The gateway's `AccessCode` callback parameter, if present.
        access_code: Option<String>,
    },
}

impl BlockContext {
    /// Returns true for the order-pay contexts that queue a notice.
    #[must_use]
    pub const fn is_order_pay(&self) -> bool {
        matches!(self, Self::OrderPay | Self::OrderPayEway { .. })
    }
}

/// Severity of a shopper-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    #[default]
    Error,
    Success,
    Notice,
}
