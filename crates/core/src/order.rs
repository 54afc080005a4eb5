//! The order collaborator the guard cancels and annotates.

use thiserror::Error;

use crate::types::{OrderId, OrderKind, OrderStatus};

/// Errors raised by an order backend.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(OrderId),
    #[error("order backend error: {0}")]
    Backend(String),
}

/// An order the guard can inspect, annotate and cancel.
pub trait Order {
    fn id(&self) -> OrderId;

    fn has_status(&self, status: OrderStatus) -> bool;

    /// Move the order to `status`, recording `note` as the reason.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the backend rejects the transition.
    fn update_status(&mut self, status: OrderStatus, note: &str) -> Result<(), OrderError>;

    /// Attach an audit note.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the backend cannot store the note.
    fn add_note(&mut self, note: &str) -> Result<(), OrderError>;

    fn kind(&self) -> OrderKind;

    /// Where the shopper pays for this order.
    fn checkout_payment_url(&self) -> String;

    /// Failed payment attempts recorded against this order so far.
    fn fraud_attempts(&self) -> u32;

    /// Persist the failed payment attempt count.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` if the backend cannot store the count.
    fn set_fraud_attempts(&mut self, attempts: u32) -> Result<(), OrderError>;
}

/// Texts attached to orders by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNotes {
    /// Added (and used as the cancellation reason) when an order's details
    /// are blacklisted.
    pub blacklisted: String,
    /// Added when an order's details are taken off the blacklists.
    pub removed: String,
}

impl Default for OrderNotes {
    fn default() -> Self {
        Self {
            blacklisted: "Order details blacklisted for future checkout.".to_owned(),
            removed: "Order details removed from blacklist.".to_owned(),
        }
    }
}

/// A note or status change recorded on a [`MemoryOrder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    StatusChanged {
        from: OrderStatus,
        to: OrderStatus,
        note: String,
    },
    Note(String),
}

/// An order held in memory, recording everything done to it.
#[derive(Debug, Clone)]
pub struct MemoryOrder {
    id: OrderId,
    status: OrderStatus,
    kind: OrderKind,
    payment_url: String,
    fraud_attempts: u32,
    events: Vec<OrderEvent>,
}

impl MemoryOrder {
    #[must_use]
    pub fn new(id: OrderId, status: OrderStatus) -> Self {
        Self {
            id,
            status,
            kind: OrderKind::Order,
            payment_url: format!("/checkout/order-pay/{id}/"),
            fraud_attempts: 0,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: OrderKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = url.into();
        self
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Everything recorded on the order, oldest first.
    #[must_use]
    pub fn events(&self) -> &[OrderEvent] {
        &self.events
    }

    /// Notes added with [`Order::add_note`], oldest first.
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            OrderEvent::Note(note) => Some(note.as_str()),
            OrderEvent::StatusChanged { .. } => None,
        })
    }
}

impl Order for MemoryOrder {
    fn id(&self) -> OrderId {
        self.id
    }

    fn has_status(&self, status: OrderStatus) -> bool {
        self.status == status
    }

    fn update_status(&mut self, status: OrderStatus, note: &str) -> Result<(), OrderError> {
        self.events.push(OrderEvent::StatusChanged {
            from: self.status,
            to: status,
            note: note.to_owned(),
        });
        self.status = status;
        Ok(())
    }

    fn add_note(&mut self, note: &str) -> Result<(), OrderError> {
        self.events.push(OrderEvent::Note(note.to_owned()));
        Ok(())
    }

    fn kind(&self) -> OrderKind {
        self.kind
    }

    fn checkout_payment_url(&self) -> String {
        self.payment_url.clone()
    }

    fn fraud_attempts(&self) -> u32 {
        self.fraud_attempts
    }

    fn set_fraud_attempts(&mut self, attempts: u32) -> Result<(), OrderError> {
        self.fraud_attempts = attempts;
        Ok(())
    }
}
