//! Products
//!
//! A fully resolved product snapshot, ready for pricing.

use rusty_money::{Money, iso::Currency};

use crate::{options::OptionGroup, personalization::PersonalizationConfig, promos::PromoWindow};

/// A product as resolved from a store row.
///
/// Orders copy the price and options out of this snapshot at purchase time;
/// later edits to the product never retroactively change historical orders.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product display name.
    pub name: String,

    /// Base price before option deltas and promos.
    pub base_price: Money<'a, Currency>,

    /// Selectable variant axes.
    pub groups: Vec<OptionGroup>,

    /// Optional promotional window.
    pub promo: Option<PromoWindow<'a>>,

    /// Free-text customization rules.
    pub personalization: PersonalizationConfig,
}
