//! Order Status Machine
//!
//! The legal lifecycle of an order and who may move it. Persistence and
//! optimistic-UI reconciliation are the caller's concern; everything here is
//! a pure lookup.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the buyer, awaiting seller confirmation.
    Pending,

    /// Accepted by the seller.
    Confirmed,

    /// Handed to the carrier.
    Shipped,

    /// Received by the buyer. Terminal.
    Delivered,

    /// Cancelled before shipment. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The wire name used by the store.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no transition leads out of this status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The statuses this one may legally move to.
    pub const fn successors(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised wire status name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Who is requesting a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The account that placed the order.
    Buyer,

    /// The shop that owns the referenced product.
    Seller,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Buyer => f.write_str("buyer"),
            Actor::Seller => f.write_str("seller"),
        }
    }
}

/// Errors raised when a requested status change is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The (from, to) pair is not in the transition table.
    #[error("illegal order status transition: {from} -> {to}")]
    Illegal {
        /// Status the order is currently in.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// The transition exists but this actor may not perform it.
    #[error("a {actor} may not move an order from {from} to {to}")]
    Forbidden {
        /// Requesting actor.
        actor: Actor,
        /// Status the order is currently in.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
}

/// Whether `from -> to` appears in the transition table.
///
/// No-ops, backward moves and anything out of a terminal status are all
/// rejected.
pub const fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    matches!(
        (from, to),
        (
            OrderStatus::Pending,
            OrderStatus::Confirmed | OrderStatus::Cancelled
        ) | (
            OrderStatus::Confirmed,
            OrderStatus::Shipped | OrderStatus::Cancelled
        ) | (OrderStatus::Shipped, OrderStatus::Delivered)
    )
}

/// Whether `actor` may perform a legal `from -> to` move.
///
/// Sellers manage the whole lifecycle; buyers may only cancel an order that
/// is still pending.
pub const fn actor_may(actor: Actor, from: OrderStatus, to: OrderStatus) -> bool {
    match actor {
        Actor::Seller => true,
        Actor::Buyer => matches!((from, to), (OrderStatus::Pending, OrderStatus::Cancelled)),
    }
}
