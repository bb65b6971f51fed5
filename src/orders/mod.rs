//! Orders
//!
//! The order snapshot as copied from the store, plus the status machine
//! governing its lifecycle. Nothing here persists anything; the external
//! store remains the source of truth and the caller writes changes back.

use chrono::{DateTime, Utc};
use rusty_money::{Money, iso::Currency};

use crate::options::OrderOptions;

pub mod optimistic;
pub mod status;

pub use status::{Actor, OrderStatus, TransitionError, UnknownStatus, actor_may, can_transition};

/// An order row as loaded from the store.
///
/// Price and options are copied from the product at purchase time, never
/// live-joined. Orders are never deleted, only transitioned to
/// [`OrderStatus::Cancelled`].
#[derive(Debug, Clone)]
pub struct Order<'a> {
    /// Opaque identifier assigned by the store.
    pub id: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Purchased quantity; always positive.
    pub qty: u32,

    /// Total charged at purchase time.
    pub amount: Money<'a, Currency>,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// The purchased product.
    pub product_id: String,

    /// Bounded buyer free-text, when personalization was enabled.
    pub personalization: Option<String>,

    /// Option selections recorded at purchase time.
    pub options: Option<OrderOptions>,

    /// Carrier tracking number, seller-editable.
    pub tracking_number: Option<String>,

    /// Private seller notes, seller-editable.
    pub seller_notes: Option<String>,

    /// Whether the seller marked the payment as received.
    pub payment_confirmed: bool,

    /// Whether the stock decrement for this order was already applied.
    /// Recorded so a retried ship request never decrements twice.
    pub stock_decremented: bool,
}

impl<'a> Order<'a> {
    /// Return a copy of this order moved to `to`, validating the transition
    /// table and the actor's permission.
    ///
    /// On rejection the original order is untouched; no partial mutation is
    /// possible. The caller persists the returned order (or rolls its local
    /// state back, see [`optimistic`]).
    ///
    /// # Errors
    ///
    /// [`TransitionError::Illegal`] when `status -> to` is not in the table,
    /// [`TransitionError::Forbidden`] when `actor` may not perform it.
    pub fn apply_transition(&self, to: OrderStatus, actor: Actor) -> Result<Self, TransitionError> {
        if !can_transition(self.status, to) {
            return Err(TransitionError::Illegal {
                from: self.status,
                to,
            });
        }

        if !actor_may(actor, self.status, to) {
            return Err(TransitionError::Forbidden {
                actor,
                from: self.status,
                to,
            });
        }

        let mut next = self.clone();
        next.status = to;

        Ok(next)
    }

    /// Claim the stock decrement for a shipped order, exactly once.
    ///
    /// Returns the quantity to subtract from the product's stock the first
    /// time it is called on a shipped order, and `None` on every retry or
    /// on any non-shipped order. The marker must be persisted along with
    /// the order for the idempotency to survive reloads.
    pub fn take_stock_decrement(&mut self) -> Option<u32> {
        if self.status != OrderStatus::Shipped || self.stock_decremented {
            return None;
        }

        self.stock_decremented = true;

        Some(self.qty)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn pending_order() -> Order<'static> {
        Order {
            id: "ord-1".to_string(),
            created_at: DateTime::UNIX_EPOCH,
            qty: 2,
            amount: Money::from_major(440, iso::MAD),
            status: OrderStatus::Pending,
            product_id: "zellige-coaster-set".to_string(),
            personalization: None,
            options: None,
            tracking_number: None,
            seller_notes: None,
            payment_confirmed: false,
            stock_decremented: false,
        }
    }

    #[test]
    fn seller_walks_full_lifecycle() -> TestResult {
        let order = pending_order();

        let confirmed = order.apply_transition(OrderStatus::Confirmed, Actor::Seller)?;
        let shipped = confirmed.apply_transition(OrderStatus::Shipped, Actor::Seller)?;
        let delivered = shipped.apply_transition(OrderStatus::Delivered, Actor::Seller)?;

        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert!(delivered.status.is_terminal());

        Ok(())
    }

    #[test]
    fn skipping_ahead_is_rejected_without_mutation() {
        let order = pending_order();

        let result = order.apply_transition(OrderStatus::Delivered, Actor::Seller);

        assert_eq!(
            result.map(|o| o.status),
            Err(TransitionError::Illegal {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            })
        );
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn buyer_cancels_pending_order() -> TestResult {
        let order = pending_order();

        let cancelled = order.apply_transition(OrderStatus::Cancelled, Actor::Buyer)?;

        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        Ok(())
    }

    #[test]
    fn buyer_may_not_confirm() {
        let order = pending_order();

        assert_eq!(
            order
                .apply_transition(OrderStatus::Confirmed, Actor::Buyer)
                .map(|o| o.status),
            Err(TransitionError::Forbidden {
                actor: Actor::Buyer,
                from: OrderStatus::Pending,
                to: OrderStatus::Confirmed,
            })
        );
    }

    #[test]
    fn stock_decrement_applies_once() -> TestResult {
        let order = pending_order();
        let mut shipped = order
            .apply_transition(OrderStatus::Confirmed, Actor::Seller)?
            .apply_transition(OrderStatus::Shipped, Actor::Seller)?;

        assert_eq!(shipped.take_stock_decrement(), Some(2));
        assert_eq!(shipped.take_stock_decrement(), None);
        assert!(shipped.stock_decremented);

        Ok(())
    }

    #[test]
    fn stock_decrement_requires_shipped_status() {
        let mut order = pending_order();

        assert_eq!(order.take_stock_decrement(), None);
        assert!(!order.stock_decremented);
    }
}
