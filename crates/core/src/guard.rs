//! The blacklist-and-cancel workflow.
//!
//! [`FraudGuard`] ties the lists, the attempt logger and the order and notice
//! collaborators together. Build one per request (or per worker that serves
//! requests one at a time); it keeps no state between calls beyond what it
//! writes to its settings store and log table.
//!
//! # Surfacing a block
//!
//! How a block reaches the shopper depends on the [`BlockContext`]:
//!
//! | Context | Effect when an order is supplied |
//! |---------|----------------------------------|
//! | `Admin` | order cancelled and annotated, nothing else |
//! | `Front` | attempt logged, [`GuardError::CheckoutRejected`] with the configured message |
//! | `OrderPay` | error notice queued |
//! | `OrderPayEway` | error notice queued, then a redirect to the payment page when the gateway sent an access code, otherwise a generic rejection |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attempt_log::{AttemptLogger, BlockedAttemptLogEntry, LogError, LogTable, LoggingFlags};
use crate::blacklist::{BlacklistSet, BlacklistStore, MatchOutcome, Matcher};
use crate::country::CountryTable;
use crate::notice::NoticeSurface;
use crate::order::{Order, OrderError, OrderNotes};
use crate::settings::{GuardSettings, SettingsError, SettingsStore};
use crate::types::{
    BlacklistAction, BlacklistCategory, BlockContext, BlockReason, CustomerRecord, LogEntryId,
    NoticeKind, OrderStatus, single_line,
};

/// Errors from the guard workflow.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Checkout must stop. The message, when present, is shown to the
    /// shopper; without one the caller shows its own generic failure text.
    #[error("checkout rejected: {}", .message.as_deref().unwrap_or("no message"))]
    CheckoutRejected { message: Option<String> },

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("order error: {0}")]
    Order(#[from] OrderError),

    #[error("attempt log error: {0}")]
    Log(#[from] LogError),
}

impl GuardError {
    /// Returns true for the terminal rejection, as opposed to a
    /// collaborator failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::CheckoutRejected { .. })
    }
}

/// How a completed blacklist action ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ActionOutcome {
    /// No customer details were given, nothing was done.
    Skipped,
    /// Lists were updated and any order handled.
    Applied,
    /// Send the shopper to `url` and stop processing the request.
    Redirect { url: String },
}

/// Screens customers and applies blacklist actions.
#[derive(Debug)]
pub struct FraudGuard<S, T> {
    settings: S,
    countries: CountryTable,
    notes: OrderNotes,
    logger: AttemptLogger<T>,
}

impl<S: SettingsStore, T: LogTable> FraudGuard<S, T> {
    /// Create a guard using the bundled country table and default notes.
    pub fn new(settings: S, logger: AttemptLogger<T>) -> Self {
        Self {
            settings,
            countries: CountryTable::bundled(),
            notes: OrderNotes::default(),
            logger,
        }
    }

    #[must_use]
    pub fn with_countries(mut self, countries: CountryTable) -> Self {
        self.countries = countries;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: OrderNotes) -> Self {
        self.notes = notes;
        self
    }

    pub const fn settings(&self) -> &S {
        &self.settings
    }

    pub const fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub const fn logger(&self) -> &AttemptLogger<T> {
        &self.logger
    }

    /// Current switches and texts.
    pub fn config(&self) -> GuardSettings {
        GuardSettings::load(&self.settings)
    }

    /// Current snapshot of all six lists.
    pub fn blacklists(&self) -> BlacklistSet {
        BlacklistSet::load(&self.settings)
    }

    /// Screen `customer` against the current lists.
    pub fn is_blacklisted(&self, customer: &CustomerRecord) -> MatchOutcome {
        let lists = self.blacklists();
        Matcher::new(&lists, &self.countries)
            .match_by_name(self.config().match_by_name)
            .check(customer)
    }

    /// Screen a live checkout.
    ///
    /// A blacklisted customer is logged with the matching list as the reason
    /// and the checkout is rejected with the configured message.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::CheckoutRejected` for a blacklisted customer, or
    /// `GuardError::Log` if the attempt could not be stored.
    pub fn screen_checkout(&mut self, customer: &CustomerRecord) -> Result<(), GuardError> {
        let MatchOutcome::Blacklisted(category) = self.is_blacklisted(customer) else {
            return Ok(());
        };

        let config = self.config();
        self.log_attempt(customer, category.into(), config.logging)?;
        Err(GuardError::CheckoutRejected {
            message: Some(config.blocked_message),
        })
    }

    /// Add or remove `customer`'s details on the lists and deal with `order`.
    ///
    /// Updates the name, IP, phone, email and address lists; identical
    /// billing and shipping addresses are stored once. In the `Front`
    /// context the attempt is logged. When an order is given it is always
    /// passed to [`Self::cancel_order`], then the block is surfaced as
    /// described in the [module docs](self).
    ///
    /// # Errors
    ///
    /// Returns `GuardError::CheckoutRejected` when the context requires
    /// aborting checkout; this is the expected result for `Front` with an
    /// order. Collaborator failures propagate as the other variants.
    pub fn process_blacklist_action(
        &mut self,
        customer: Option<&CustomerRecord>,
        order: Option<&mut dyn Order>,
        notices: &mut dyn NoticeSurface,
        action: BlacklistAction,
        context: &BlockContext,
    ) -> Result<ActionOutcome, GuardError> {
        let Some(customer) = customer.filter(|c| !c.is_empty()) else {
            return Ok(ActionOutcome::Skipped);
        };

        self.update_lists(customer, action)?;
        let config = self.config();

        if *context == BlockContext::Front {
            self.log_attempt(customer, BlockReason::MaxFraudAttempts, config.logging)?;
        }

        let Some(order) = order else {
            return Ok(ActionOutcome::Applied);
        };

        self.cancel_order(order, action)?;

        if context.is_order_pay() {
            notices.add_notice_once(&config.blocked_message, NoticeKind::Error);
        }

        match context {
            BlockContext::Front => Err(GuardError::CheckoutRejected {
                message: Some(config.blocked_message),
            }),
            BlockContext::OrderPayEway {
                access_code: Some(_),
            } => Ok(ActionOutcome::Redirect {
                url: order.checkout_payment_url(),
            }),
            BlockContext::OrderPayEway { access_code: None } => {
                Err(GuardError::CheckoutRejected { message: None })
            }
            BlockContext::Admin | BlockContext::OrderPay => Ok(ActionOutcome::Applied),
        }
    }

    /// Annotate `order` for `action`, cancelling it when blacklisting.
    ///
    /// Only top-level orders that are not already cancelled change status.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::Order` if the order backend fails.
    pub fn cancel_order(
        &self,
        order: &mut dyn Order,
        action: BlacklistAction,
    ) -> Result<(), GuardError> {
        match action {
            BlacklistAction::Remove => {
                order.add_note(&self.notes.removed)?;
            }
            BlacklistAction::Add => {
                if !order.has_status(OrderStatus::Cancelled) && order.kind().is_top_level() {
                    order.update_status(OrderStatus::Cancelled, &self.notes.blacklisted)?;
                    tracing::info!(order_id = %order.id(), "cancelled blacklisted order");
                }
                order.add_note(&self.notes.blacklisted)?;
            }
        }
        Ok(())
    }

    /// Queue the configured blocked message as an error notice, once.
    pub fn show_blocked_message(&self, notices: &mut dyn NoticeSurface) {
        notices.add_notice_once(&self.config().blocked_message, NoticeKind::Error);
    }

    /// Write one blocked attempt to the enabled sinks.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::Log` if the table sink fails.
    pub fn log_attempt(
        &mut self,
        customer: &CustomerRecord,
        reason: BlockReason,
        flags: LoggingFlags,
    ) -> Result<Option<LogEntryId>, GuardError> {
        let entry = BlockedAttemptLogEntry::now(customer, reason);
        Ok(self.logger.record(&entry, flags)?)
    }

    fn update_lists(
        &mut self,
        customer: &CustomerRecord,
        action: BlacklistAction,
    ) -> Result<(), GuardError> {
        // Scalars become one entry each; only distinct addresses span lines.
        let updates = [
            (BlacklistCategory::FullName, single_line(&customer.full_name)),
            (BlacklistCategory::IpAddress, single_line(&customer.ip_address)),
            (BlacklistCategory::BillingPhone, single_line(&customer.billing_phone)),
            (BlacklistCategory::BillingEmail, single_line(&customer.billing_email)),
            (BlacklistCategory::Address, customer.address_entries()),
        ];

        let mut store = BlacklistStore::new(&mut self.settings);
        for (category, entries) in &updates {
            store.apply(*category, Some(entries.as_str()), action)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::attempt_log::MemoryLogTable;
    use crate::notice::NoticeQueue;
    use crate::order::{MemoryOrder, OrderEvent};
    use crate::settings::{BLOCKED_MESSAGE_KEY, DEFAULT_BLOCKED_MESSAGE, MemorySettings};
    use crate::types::{Address, OrderId, OrderKind};

    type TestGuard = FraudGuard<MemorySettings, MemoryLogTable>;

    fn guard() -> TestGuard {
        FraudGuard::new(MemorySettings::new(), AttemptLogger::new(MemoryLogTable::new()))
    }

    fn customer() -> CustomerRecord {
        CustomerRecord {
            full_name: "Jane Doe".into(),
            ip_address: "1.2.3.4".into(),
            billing_phone: "555-0100".into(),
            billing_email: "jane@example.com".into(),
            billing_address: Address::new(["1 Main St", "Springfield", "IL", "62701", "US"]),
            shipping_address: Some(Address::new(["1 Main St", "Springfield", "IL", "62701", "US"])),
        }
    }

    fn order() -> MemoryOrder {
        MemoryOrder::new(OrderId::new(100), OrderStatus::Processing)
            .with_payment_url("https://shop.test/checkout/order-pay/100/")
    }

    fn stored(guard: &TestGuard, category: BlacklistCategory) -> Option<String> {
        guard.settings().get(category.settings_key())
    }

    #[test]
    fn test_empty_customer_is_skipped() {
        let mut guard = guard();
        let mut notices = NoticeQueue::new();
        let mut order = order();

        let outcome = guard
            .process_blacklist_action(
                Some(&CustomerRecord::default()),
                Some(&mut order),
                &mut notices,
                BlacklistAction::Add,
                &BlockContext::Front,
            )
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Skipped);
        assert!(order.events().is_empty());
        assert!(guard.settings().values().is_empty());
    }

    #[test]
    fn test_admin_add_updates_five_lists() {
        let mut guard = guard();
        let mut notices = NoticeQueue::new();

        let outcome = guard
            .process_blacklist_action(
                Some(&customer()),
                None,
                &mut notices,
                BlacklistAction::Add,
                &BlockContext::Admin,
            )
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(stored(&guard, BlacklistCategory::FullName).as_deref(), Some("Jane Doe"));
        assert_eq!(stored(&guard, BlacklistCategory::IpAddress).as_deref(), Some("1.2.3.4"));
        assert_eq!(stored(&guard, BlacklistCategory::BillingPhone).as_deref(), Some("555-0100"));
        assert_eq!(
            stored(&guard, BlacklistCategory::BillingEmail).as_deref(),
            Some("jane@example.com")
        );
        assert_eq!(
            stored(&guard, BlacklistCategory::Address).as_deref(),
            Some("1 Main St,Springfield,IL,62701,US")
        );
        assert_eq!(stored(&guard, BlacklistCategory::EmailDomain), None);
        assert!(guard.logger().table().rows().is_empty());
        assert!(notices.notices().is_empty());
    }

    #[test]
    fn test_remove_restores_lists() {
        let mut guard = guard();
        guard
            .settings_mut()
            .set(BlacklistCategory::IpAddress.settings_key(), "9.9.9.9")
            .unwrap();
        let mut notices = NoticeQueue::new();

        for action in [BlacklistAction::Add, BlacklistAction::Remove] {
            guard
                .process_blacklist_action(
                    Some(&customer()),
                    None,
                    &mut notices,
                    action,
                    &BlockContext::Admin,
                )
                .unwrap();
        }

        assert_eq!(stored(&guard, BlacklistCategory::IpAddress).as_deref(), Some("9.9.9.9"));
        assert_eq!(stored(&guard, BlacklistCategory::FullName).as_deref(), Some(""));
    }

    #[test]
    fn test_front_with_order_rejects_and_logs() {
        let mut guard = guard();
        let mut notices = NoticeQueue::new();
        let mut order = order();

        let err = guard
            .process_blacklist_action(
                Some(&customer()),
                Some(&mut order),
                &mut notices,
                BlacklistAction::Add,
                &BlockContext::Front,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            GuardError::CheckoutRejected { message: Some(ref m) } if m == DEFAULT_BLOCKED_MESSAGE
        ));
        assert!(order.has_status(OrderStatus::Cancelled));
        assert!(notices.notices().is_empty());

        let rows = guard.logger().table().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry.blacklisted_reason, "Max Fraud Attempts exceeded");
    }

    #[test]
    fn test_front_without_order_logs_only() {
        let mut guard = guard();
        let mut notices = NoticeQueue::new();

        let outcome = guard
            .process_blacklist_action(
                Some(&customer()),
                None,
                &mut notices,
                BlacklistAction::Add,
                &BlockContext::Front,
            )
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(guard.logger().table().rows().len(), 1);
    }

    #[test]
    fn test_order_pay_queues_notice_once() {
        let mut guard = guard();
        guard
            .settings_mut()
            .set(BLOCKED_MESSAGE_KEY, "No orders for you.")
            .unwrap();
        let mut notices = NoticeQueue::new();
        let mut order = order();

        for _ in 0..2 {
            let outcome = guard
                .process_blacklist_action(
                    Some(&customer()),
                    Some(&mut order),
                    &mut notices,
                    BlacklistAction::Add,
                    &BlockContext::OrderPay,
                )
                .unwrap();
            assert_eq!(outcome, ActionOutcome::Applied);
        }

        assert_eq!(
            notices.notices(),
            [(NoticeKind::Error, "No orders for you.".to_owned())]
        );
    }

    #[test]
    fn test_eway_with_access_code_redirects() {
        let mut guard = guard();
        let mut notices = NoticeQueue::new();
        let mut order = order();

        let outcome = guard
            .process_blacklist_action(
                Some(&customer()),
                Some(&mut order),
                &mut notices,
                BlacklistAction::Add,
                &BlockContext::OrderPayEway {
                    access_code: Some("abc".into()),
                },
            )
            .unwrap();

        assert_eq!(
            outcome,
            ActionOutcome::Redirect {
                url: "https://shop.test/checkout/order-pay/100/".into()
            }
        );
        assert_eq!(notices.notices().len(), 1);
    }

    #[test]
    fn test_eway_without_access_code_fails_generically() {
        let mut guard = guard();
        let mut notices = NoticeQueue::new();
        let mut order = order();

        let err = guard
            .process_blacklist_action(
                Some(&customer()),
                Some(&mut order),
                &mut notices,
                BlacklistAction::Add,
                &BlockContext::OrderPayEway { access_code: None },
            )
            .unwrap_err();

        assert!(matches!(err, GuardError::CheckoutRejected { message: None }));
        assert!(err.is_rejection());
        assert_eq!(notices.notices().len(), 1);
    }

    #[test]
    fn test_cancel_order_remove_only_notes() {
        let guard = guard();
        let mut order = order();

        guard.cancel_order(&mut order, BlacklistAction::Remove).unwrap();

        assert!(order.has_status(OrderStatus::Processing));
        assert_eq!(
            order.events(),
            [OrderEvent::Note("Order details removed from blacklist.".into())]
        );
    }

    #[test]
    fn test_cancel_order_add_cancels_top_level() {
        let guard = guard().with_notes(OrderNotes {
            blacklisted: "fraud".into(),
            removed: "cleared".into(),
        });
        let mut order = order();

        guard.cancel_order(&mut order, BlacklistAction::Add).unwrap();

        assert_eq!(
            order.events(),
            [
                OrderEvent::StatusChanged {
                    from: OrderStatus::Processing,
                    to: OrderStatus::Cancelled,
                    note: "fraud".into(),
                },
                OrderEvent::Note("fraud".into()),
            ]
        );
    }

    #[test]
    fn test_cancel_order_skips_cancelled_and_refunds() {
        let guard = guard();

        let mut cancelled = MemoryOrder::new(OrderId::new(1), OrderStatus::Cancelled);
        guard.cancel_order(&mut cancelled, BlacklistAction::Add).unwrap();
        assert_eq!(cancelled.events().len(), 1);

        let mut refund =
            MemoryOrder::new(OrderId::new(2), OrderStatus::Completed).with_kind(OrderKind::Refund);
        guard.cancel_order(&mut refund, BlacklistAction::Add).unwrap();
        assert!(refund.has_status(OrderStatus::Completed));
        assert_eq!(refund.notes().count(), 1);
    }

    #[test]
    fn test_screen_checkout_logs_matched_list() {
        let mut guard = guard();
        guard
            .settings_mut()
            .set(BlacklistCategory::BillingEmail.settings_key(), "jane@example.com")
            .unwrap();

        let err = guard.screen_checkout(&customer()).unwrap_err();

        assert!(err.is_rejection());
        let rows = guard.logger().table().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry.blacklisted_reason, "Billing Email");
    }

    #[test]
    fn test_screen_checkout_clear() {
        let mut guard = guard();
        assert!(guard.screen_checkout(&customer()).is_ok());
        assert!(guard.logger().table().rows().is_empty());
    }

    #[test]
    fn test_show_blocked_message_once() {
        let guard = guard();
        let mut notices = NoticeQueue::new();
        guard.show_blocked_message(&mut notices);
        guard.show_blocked_message(&mut notices);
        assert_eq!(notices.notices().len(), 1);
    }
}
