//! Optimistic Status Updates
//!
//! The seller UI applies a status change to its local copy before the store
//! confirms it. Instead of ad hoc revert-on-catch blocks, a change is
//! captured as a value: attempt the local apply, await persistence, and on
//! failure replay the recorded rollback.

use super::{Actor, Order, OrderStatus, TransitionError};

/// A validated status change, recorded so it can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status the order held before the change.
    pub from: OrderStatus,

    /// Status the change moved the order to.
    pub to: OrderStatus,
}

impl StatusChange {
    /// Validate and locally apply a status change, returning the updated
    /// order together with the change record to keep until the store
    /// confirms the write.
    ///
    /// # Errors
    ///
    /// Propagates the [`TransitionError`] from
    /// [`Order::apply_transition`]; the caller's local state must remain
    /// unchanged in that case.
    pub fn attempt<'a>(
        order: &Order<'a>,
        to: OrderStatus,
        actor: Actor,
    ) -> Result<(Order<'a>, StatusChange), TransitionError> {
        let from = order.status;
        let next = order.apply_transition(to, actor)?;

        Ok((next, StatusChange { from, to }))
    }

    /// The inverse record, describing the change that would undo this one.
    pub const fn invert(self) -> StatusChange {
        StatusChange {
            from: self.to,
            to: self.from,
        }
    }

    /// Restore an optimistically-updated order to its prior status after
    /// the store rejected the write.
    ///
    /// This deliberately bypasses the transition table: the forward move
    /// was already validated, and its inverse is usually not a legal
    /// forward transition.
    pub fn roll_back<'a>(self, order: &Order<'a>) -> Order<'a> {
        let mut prior = order.clone();
        prior.status = self.from;

        prior
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn confirmed_order() -> Order<'static> {
        Order {
            id: "ord-2".to_string(),
            created_at: DateTime::UNIX_EPOCH,
            qty: 1,
            amount: Money::from_major(1200, iso::MAD),
            status: OrderStatus::Confirmed,
            product_id: "berber-wool-rug".to_string(),
            personalization: None,
            options: None,
            tracking_number: None,
            seller_notes: None,
            payment_confirmed: true,
            stock_decremented: false,
        }
    }

    #[test]
    fn attempt_returns_updated_order_and_record() -> TestResult {
        let order = confirmed_order();

        let (updated, change) = StatusChange::attempt(&order, OrderStatus::Shipped, Actor::Seller)?;

        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(
            change,
            StatusChange {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Shipped,
            }
        );

        Ok(())
    }

    #[test]
    fn attempt_rejects_illegal_change() {
        let order = confirmed_order();

        let result = StatusChange::attempt(&order, OrderStatus::Delivered, Actor::Seller);

        assert!(matches!(result, Err(TransitionError::Illegal { .. })));
    }

    #[test]
    fn roll_back_restores_prior_status() -> TestResult {
        let order = confirmed_order();

        let (updated, change) = StatusChange::attempt(&order, OrderStatus::Shipped, Actor::Seller)?;
        let restored = change.roll_back(&updated);

        assert_eq!(restored.status, OrderStatus::Confirmed);

        Ok(())
    }

    #[test]
    fn invert_swaps_endpoints() {
        let change = StatusChange {
            from: OrderStatus::Pending,
            to: OrderStatus::Confirmed,
        };

        assert_eq!(
            change.invert(),
            StatusChange {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Pending,
            }
        );
    }
}
