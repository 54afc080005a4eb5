//! Counting failed payment attempts per order.
//!
//! Every failed checkout or payment for an order bumps a counter stored on
//! the order. While the count stays within
//! [`GuardSettings::allowed_attempts`](crate::GuardSettings) nothing else
//! happens; the attempt that goes past it blacklists the customer through
//! [`FraudGuard::process_blacklist_action`], which cancels the order and
//! logs the attempt as "Max Fraud Attempts exceeded" in the `Front` context.

use serde::{Deserialize, Serialize};

use crate::attempt_log::LogTable;
use crate::guard::{ActionOutcome, FraudGuard, GuardError};
use crate::notice::NoticeSurface;
use crate::order::Order;
use crate::settings::SettingsStore;
use crate::types::{BlacklistAction, BlockContext, CustomerRecord};

/// What recording one failed attempt led to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AttemptOutcome {
    /// Still within the allowance.
    Counted { attempts: u32, allowed: u32 },
    /// The allowance was exceeded and the customer blacklisted.
    Blacklisted { attempts: u32, action: ActionOutcome },
}

impl<S: SettingsStore, T: LogTable> FraudGuard<S, T> {
    /// Record a failed checkout or payment attempt against `order`.
    ///
    /// Once the count exceeds the allowed number, `customer` is added to
    /// the blacklists with `order` in `context` (normally
    /// [`BlockContext::Front`]).
    ///
    /// # Errors
    ///
    /// Returns `GuardError::Order` if the count cannot be stored. Past the
    /// limit, whatever [`FraudGuard::process_blacklist_action`] returns,
    /// including `GuardError::CheckoutRejected` for the `Front` context.
    pub fn record_failed_attempt(
        &mut self,
        customer: &CustomerRecord,
        order: &mut dyn Order,
        notices: &mut dyn NoticeSurface,
        context: &BlockContext,
    ) -> Result<AttemptOutcome, GuardError> {
        let allowed = self.config().allowed_attempts;
        let attempts = order.fraud_attempts().saturating_add(1);
        order.set_fraud_attempts(attempts)?;

        if attempts <= allowed {
            tracing::debug!(order_id = %order.id(), attempts, allowed, "failed attempt counted");
            return Ok(AttemptOutcome::Counted { attempts, allowed });
        }

        tracing::warn!(order_id = %order.id(), attempts, allowed, "fraud attempt limit exceeded");
        let action = self.process_blacklist_action(
            Some(customer),
            Some(order),
            notices,
            BlacklistAction::Add,
            context,
        )?;
        Ok(AttemptOutcome::Blacklisted { attempts, action })
    }
}
