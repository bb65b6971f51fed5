//! Souk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError},
    options::{
        OptionGroup, OptionValue, OptionsError, OrderOptions, SelectedOption, Selections,
        missing_required, validate_groups,
    },
    orders::{
        Actor, Order, OrderStatus, TransitionError, actor_may, can_transition,
        optimistic::StatusChange,
    },
    personalization::{PersonalizationConfig, PersonalizationError, clamp_input},
    pricing::{PricingError, Quote, percent_off, price_range, quote, selected_total},
    products::Product,
    promos::{PromoError, PromoWindow},
    receipt::{Receipt, ReceiptError},
    snapshot::{ProductSnapshot, SnapshotError},
};
