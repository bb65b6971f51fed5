//! Snapshot Resolution
//!
//! Deserializable mirrors of the store's product rows, resolved once at the
//! boundary into the typed [`Product`] the engine works with. The store is
//! loose about numeric fields, so deltas that are not finite numbers are
//! recovered locally as 0 and a promo missing either timestamp resolves to
//! no promo at all.

use chrono::{DateTime, Utc};
use rusty_money::{Money, iso};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    options::{OptionGroup, OptionValue},
    personalization::PersonalizationConfig,
    products::Product,
    promos::PromoWindow,
};

/// Errors raised while resolving a product snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The row carries no usable base price.
    #[error("product snapshot has no usable base price")]
    MissingBasePrice,

    /// The base price is zero or negative.
    #[error("product base price must be positive, got {0} MAD")]
    NonPositiveBasePrice(i64),
}

/// A whole-dirham amount as the store writes it: a number, a numeric
/// string, or garbage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseAmount {
    /// A plain integer amount.
    Int(i64),

    /// A float amount, rounded to whole dirhams.
    Float(f64),

    /// A stringified amount.
    Text(String),
}

impl LooseAmount {
    /// The amount in whole dirhams, or `None` when it cannot be read as a
    /// finite number.
    pub fn as_mad(&self) -> Option<i64> {
        match self {
            LooseAmount::Int(amount) => Some(*amount),
            LooseAmount::Float(amount) => float_to_mad(*amount),
            LooseAmount::Text(raw) => {
                let trimmed = raw.trim();

                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_mad))
            }
        }
    }
}

/// Amounts beyond a quadrillion dirhams are treated as malformed.
const MAX_ABS_MAD: f64 = 1e15;

/// Round a float to whole dirhams, rejecting non-finite or absurd values.
#[expect(
    clippy::cast_possible_truncation,
    reason = "rounded and bounded well inside the i64 range before casting"
)]
fn float_to_mad(amount: f64) -> Option<i64> {
    if !amount.is_finite() {
        return None;
    }

    let rounded = amount.round();
    if rounded.abs() > MAX_ABS_MAD {
        return None;
    }

    Some(rounded as i64)
}

/// One option value as stored in a product row's options config.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionValueSnapshot {
    /// Value id; the label doubles as the id when absent.
    #[serde(default)]
    pub id: Option<String>,

    /// Display label.
    pub label: String,

    /// Loose price delta; malformed values resolve to 0.
    #[serde(default)]
    pub price_delta_mad: Option<LooseAmount>,
}

impl OptionValueSnapshot {
    fn resolve(&self) -> OptionValue {
        OptionValue {
            id: self.id.clone().unwrap_or_else(|| self.label.clone()),
            label: self.label.clone(),
            price_delta: self
                .price_delta_mad
                .as_ref()
                .and_then(LooseAmount::as_mad)
                .unwrap_or(0),
        }
    }
}

/// One option group as stored in a product row's options config.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionGroupSnapshot {
    /// Group id; the name doubles as the id when absent.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name.
    pub name: String,

    /// Whether a selection is required before checkout.
    #[serde(default)]
    pub required: bool,

    /// The group's values.
    #[serde(default)]
    pub values: Vec<OptionValueSnapshot>,
}

impl OptionGroupSnapshot {
    fn resolve(&self) -> OptionGroup {
        OptionGroup {
            id: self.id.clone().unwrap_or_else(|| self.name.clone()),
            name: self.name.clone(),
            required: self.required,
            values: self.values.iter().map(OptionValueSnapshot::resolve).collect(),
        }
    }
}

/// A product row as the store returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSnapshot {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Base price in whole dirhams.
    #[serde(default)]
    pub price_mad: Option<LooseAmount>,

    /// Option schema.
    #[serde(default)]
    pub options_config: Vec<OptionGroupSnapshot>,

    /// Promo price in whole dirhams.
    #[serde(default)]
    pub promo_price_mad: Option<LooseAmount>,

    /// Promo window start, RFC 3339.
    #[serde(default)]
    pub promo_starts_at: Option<String>,

    /// Promo window end, RFC 3339.
    #[serde(default)]
    pub promo_ends_at: Option<String>,

    /// Personalization gate.
    #[serde(default)]
    pub personalization_enabled: bool,

    /// Personalization instructions shown to the buyer.
    #[serde(default)]
    pub personalization_instructions: Option<String>,

    /// Personalization input bound, in characters.
    #[serde(default)]
    pub personalization_max_chars: Option<i64>,
}

impl ProductSnapshot {
    /// Resolve the loose row into a typed [`Product`].
    ///
    /// Only an unusable base price fails; a promo that does not form a
    /// coherent window resolves to `None` (inactive), and malformed option
    /// deltas resolve to 0.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the base price is missing,
    /// unreadable, or not positive.
    pub fn resolve(&self) -> Result<Product<'static>, SnapshotError> {
        let base_mad = self
            .price_mad
            .as_ref()
            .and_then(LooseAmount::as_mad)
            .ok_or(SnapshotError::MissingBasePrice)?;

        if base_mad <= 0 {
            return Err(SnapshotError::NonPositiveBasePrice(base_mad));
        }

        Ok(Product {
            name: self.name.clone().unwrap_or_default(),
            base_price: Money::from_major(base_mad, iso::MAD),
            groups: self
                .options_config
                .iter()
                .map(OptionGroupSnapshot::resolve)
                .collect(),
            promo: self.resolve_promo(),
            personalization: PersonalizationConfig {
                enabled: self.personalization_enabled,
                instructions: self.personalization_instructions.clone().unwrap_or_default(),
                max_chars: self
                    .personalization_max_chars
                    .and_then(|max| usize::try_from(max).ok())
                    .unwrap_or(0),
            },
        })
    }

    /// Build the promo window when all three fields are present and
    /// well-formed; anything else resolves to no promo.
    fn resolve_promo(&self) -> Option<PromoWindow<'static>> {
        let price_mad = self.promo_price_mad.as_ref().and_then(LooseAmount::as_mad)?;
        let starts_at = parse_timestamp(self.promo_starts_at.as_deref()?)?;
        let ends_at = parse_timestamp(self.promo_ends_at.as_deref()?)?;

        Some(PromoWindow {
            price: Money::from_major(price_mad, iso::MAD),
            starts_at,
            ends_at,
        })
    }
}

/// Parse an RFC 3339 timestamp, normalised to UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
