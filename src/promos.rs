//! Promo Windows
//!
//! A time-bounded discounted price overriding a product's base price.

use chrono::{DateTime, Utc};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised while validating a promo window at save time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    /// The promo price is zero or negative.
    #[error("promo price must be positive")]
    PriceNotPositive,

    /// The promo price does not undercut the base price.
    #[error("promo price {promo} is not strictly below the base price {base}")]
    PriceNotBelowBase {
        /// Formatted promo price.
        promo: String,
        /// Formatted base price.
        base: String,
    },

    /// The window ends at or before it starts.
    #[error("promo window ends at {ends_at}, which is not after it starts at {starts_at}")]
    EmptyWindow {
        /// Window start.
        starts_at: DateTime<Utc>,
        /// Window end.
        ends_at: DateTime<Utc>,
    },
}

/// A time-bounded promotional price.
///
/// A window with missing or unparseable timestamps is never constructed;
/// boundary resolution treats such a promo as absent, which renders it
/// inactive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromoWindow<'a> {
    /// Price replacing the base price while the window is active.
    pub price: Money<'a, Currency>,

    /// Inclusive start of the window.
    pub starts_at: DateTime<Utc>,

    /// Exclusive end of the window.
    pub ends_at: DateTime<Utc>,
}

impl PromoWindow<'_> {
    /// Whether the promo applies at `now`.
    ///
    /// Active iff the price is positive and `now` lies within
    /// `[starts_at, ends_at)`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.price.to_minor_units() > 0 && self.starts_at <= now && now < self.ends_at
    }

    /// Validate the window against the product's base price.
    ///
    /// This gates saving a product; an already-stored promo keeps applying
    /// until the seller corrects it.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoError`] describing the first violated invariant.
    pub fn validate(&self, base_price: &Money<'_, Currency>) -> Result<(), PromoError> {
        if self.price.to_minor_units() <= 0 {
            return Err(PromoError::PriceNotPositive);
        }

        if self.price.to_minor_units() >= base_price.to_minor_units() {
            return Err(PromoError::PriceNotBelowBase {
                promo: self.price.to_string(),
                base: base_price.to_string(),
            });
        }

        if self.ends_at <= self.starts_at {
            return Err(PromoError::EmptyWindow {
                starts_at: self.starts_at,
                ends_at: self.ends_at,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn window(price_mad: i64) -> PromoWindow<'static> {
        PromoWindow {
            price: Money::from_major(price_mad, iso::MAD),
            starts_at: at(2026, 3, 1),
            ends_at: at(2026, 4, 1),
        }
    }

    #[test]
    fn active_strictly_inside_window() {
        let promo = window(150);

        assert!(promo.is_active(at(2026, 3, 15)));
    }

    #[test]
    fn active_at_start_boundary() {
        let promo = window(150);

        assert!(promo.is_active(promo.starts_at));
    }

    #[test]
    fn inactive_at_end_boundary() {
        let promo = window(150);

        assert!(!promo.is_active(promo.ends_at));
    }

    #[test]
    fn inactive_before_start() {
        let promo = window(150);
        let before = promo.starts_at - chrono::Duration::seconds(1);

        assert!(!promo.is_active(before));
    }

    #[test]
    fn inactive_with_non_positive_price() {
        let promo = window(0);

        assert!(!promo.is_active(at(2026, 3, 15)));
    }

    #[test]
    fn validate_accepts_sane_window() -> TestResult {
        let promo = window(150);
        promo.validate(&Money::from_major(200, iso::MAD))?;

        Ok(())
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let promo = window(0);

        assert_eq!(
            promo.validate(&Money::from_major(200, iso::MAD)),
            Err(PromoError::PriceNotPositive)
        );
    }

    #[test]
    fn validate_rejects_price_at_or_above_base() {
        let promo = window(200);

        assert!(matches!(
            promo.validate(&Money::from_major(200, iso::MAD)),
            Err(PromoError::PriceNotBelowBase { .. })
        ));
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let mut promo = window(150);
        promo.ends_at = promo.starts_at;

        assert!(matches!(
            promo.validate(&Money::from_major(200, iso::MAD)),
            Err(PromoError::EmptyWindow { .. })
        ));
    }
}
