//! Souk
//!
//! Souk is the pricing and order lifecycle engine behind a Moroccan artisan
//! marketplace: it computes displayed price ranges and selected totals over
//! a product's option deltas, applies time-bounded promo windows, bounds
//! buyer personalization text, and validates order status transitions
//! before they reach the store.
//!
//! Everything here is synchronous and stateless. The external store remains
//! the source of truth; this crate re-derives its results from whatever row
//! is currently loaded and leaves persistence to the caller.

pub mod fixtures;
pub mod options;
pub mod orders;
pub mod personalization;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promos;
pub mod receipt;
pub mod snapshot;
pub mod utils;
