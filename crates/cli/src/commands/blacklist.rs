//! Screening customers and editing the blacklists.
//!
//! # Usage
//!
//! ```bash
//! # Screen a customer without recording anything
//! fg-cli check customer.json
//!
//! # Screen and log the attempt if blocked
//! fg-cli check customer.json --record
//!
//! # Put every detail of a customer on the blacklists, or take it off
//! fg-cli add customer.json
//! fg-cli remove customer.json
//! ```

use fraud_guard_core::{
    ActionOutcome, BlacklistAction, BlockContext, CustomerRecord, MatchOutcome, NoticeQueue,
};

use super::{CliGuard, CommandError};

/// Screen `customer`, optionally logging the attempt when blocked.
///
/// # Errors
///
/// Returns `CommandError::Guard` if recording the attempt fails.
pub fn check(
    guard: &mut CliGuard,
    customer: &CustomerRecord,
    record: bool,
) -> Result<MatchOutcome, CommandError> {
    let outcome = guard.is_blacklisted(customer);

    match outcome {
        MatchOutcome::Clear => tracing::info!("Customer is not blacklisted"),
        MatchOutcome::Blacklisted(category) => {
            tracing::info!(reason = %category, "Customer is blacklisted");
            if record {
                match guard.screen_checkout(customer) {
                    Ok(()) => {}
                    Err(e) if e.is_rejection() => tracing::info!("Attempt recorded: {e}"),
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    Ok(outcome)
}

/// Add or remove `customer`'s details as an operator action.
///
/// # Errors
///
/// Returns `CommandError::Guard` if the settings file cannot be written.
pub fn apply(
    guard: &mut CliGuard,
    customer: &CustomerRecord,
    action: BlacklistAction,
) -> Result<ActionOutcome, CommandError> {
    let mut notices = NoticeQueue::new();
    let outcome = guard.process_blacklist_action(
        Some(customer),
        None,
        &mut notices,
        action,
        &BlockContext::Admin,
    )?;

    match &outcome {
        ActionOutcome::Skipped => tracing::warn!("Customer record is empty, nothing to do"),
        _ => tracing::info!(%action, "Blacklists updated"),
    }
    Ok(outcome)
}
