//! Pricing
//!
//! Pure price computation over a product's base price, its option deltas and
//! an optional promo window: the displayed price range, the total for a
//! concrete selection, and the discounted total while a promo is active.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    options::{OptionGroup, Selections},
    products::Product,
    promos::PromoWindow,
};

/// Errors that can occur while computing prices.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The pricing output for one product and selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote<'a> {
    /// Cheapest possible total across all option combinations.
    pub min_total: Money<'a, Currency>,

    /// Most expensive possible total across all option combinations.
    pub max_total: Money<'a, Currency>,

    /// Total for the concrete selection, before any promo.
    pub current_total: Money<'a, Currency>,

    /// Whether a promo window applies right now.
    pub promo_active: bool,

    /// Discounted total while the promo is active.
    pub promo_total: Option<Money<'a, Currency>>,

    /// Rounded percentage saved by the promo, in `[0, 100]`.
    pub percent_off: Option<u8>,
}

impl<'a> Quote<'a> {
    /// The amount the buyer actually pays: the promo total when active,
    /// otherwise the selected total.
    pub fn payable(&self) -> Money<'a, Currency> {
        self.promo_total.unwrap_or(self.current_total)
    }

    /// Whether every option combination prices the same, in which case the
    /// caller should render a single price instead of a range.
    pub fn is_single_price(&self) -> bool {
        self.min_total == self.max_total
    }
}

/// Add a signed whole-dirham delta to a price.
fn add_major<'a>(price: Money<'a, Currency>, delta: i64) -> Result<Money<'a, Currency>, MoneyError> {
    price.add(Money::from_major(delta, price.currency()))
}

/// The displayed price range across all possible option combinations.
///
/// Each group contributes its minimum and maximum delta (a group with no
/// values contributes 0); the sums are added to the base price.
///
/// # Errors
///
/// Returns a [`PricingError`] if the underlying money arithmetic fails.
pub fn price_range<'a>(
    base_price: Money<'a, Currency>,
    groups: &[OptionGroup],
) -> Result<(Money<'a, Currency>, Money<'a, Currency>), PricingError> {
    let min: i64 = groups.iter().map(OptionGroup::min_delta).sum();
    let max: i64 = groups.iter().map(OptionGroup::max_delta).sum();

    Ok((add_major(base_price, min)?, add_major(base_price, max)?))
}

/// The total for a concrete selection: base price plus the delta of each
/// selected value. Unselected groups and unknown values contribute 0.
///
/// # Errors
///
/// Returns a [`PricingError`] if the underlying money arithmetic fails.
pub fn selected_total<'a>(
    base_price: Money<'a, Currency>,
    groups: &[OptionGroup],
    selections: &Selections,
) -> Result<Money<'a, Currency>, PricingError> {
    let delta: i64 = groups.iter().map(|group| group.delta_for(selections)).sum();

    Ok(add_major(base_price, delta)?)
}

/// The discounted total while a promo is active: the base portion of the
/// selected total is replaced with the promo price, and the same option
/// deltas are re-added.
///
/// # Errors
///
/// Returns a [`PricingError`] if the underlying money arithmetic fails.
pub fn discounted_total<'a>(
    base_price: Money<'a, Currency>,
    promo: &PromoWindow<'a>,
    selected: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, PricingError> {
    let deltas = selected.sub(base_price)?;

    Ok(promo.price.add(deltas)?)
}

/// The rounded percentage saved between a selected total and a discounted
/// total.
///
/// Uses round-half-up and is always in `[0, 100]`; returns 0 whenever the
/// selected total is not positive.
pub fn percent_off(selected: &Money<'_, Currency>, discounted: &Money<'_, Currency>) -> u8 {
    let selected_minor = selected.to_minor_units();
    if selected_minor <= 0 {
        return 0;
    }

    let saved_minor = selected_minor
        .saturating_sub(discounted.to_minor_units())
        .max(0);

    let percent = Decimal::from(saved_minor)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(Decimal::from(selected_minor)))
        .unwrap_or(Decimal::ZERO);

    let rounded = percent.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_u8().unwrap_or(100).min(100)
}

/// Compute the full pricing output for a product and selection at `now`.
///
/// # Errors
///
/// Returns a [`PricingError`] if the underlying money arithmetic fails.
pub fn quote<'a>(
    product: &Product<'a>,
    selections: &Selections,
    now: DateTime<Utc>,
) -> Result<Quote<'a>, PricingError> {
    let (min_total, max_total) = price_range(product.base_price, &product.groups)?;
    let current_total = selected_total(product.base_price, &product.groups, selections)?;

    let active = product.promo.filter(|promo| promo.is_active(now));

    let (promo_total, percent) = match active {
        Some(promo) => {
            let discounted = discounted_total(product.base_price, &promo, current_total)?;

            (Some(discounted), Some(percent_off(&current_total, &discounted)))
        }
        None => (None, None),
    };

    Ok(Quote {
        min_total,
        max_total,
        current_total,
        promo_active: active.is_some(),
        promo_total,
        percent_off: percent,
    })
}
