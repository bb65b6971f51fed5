//! Product Options
//!
//! Selectable variant axes for a product (e.g. Size), each value carrying an
//! optional whole-dirham price adjustment.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Maximum length, in characters, of a group name or value label.
pub const MAX_LABEL_CHARS: usize = 60;

/// Buyer selections, mapping a group id to the chosen value id.
pub type Selections = FxHashMap<String, String>;

/// Errors raised while validating a product's option schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// A group has an empty display name.
    #[error("option group '{group}' has an empty name")]
    EmptyName {
        /// Offending group id.
        group: String,
    },

    /// A group name exceeds [`MAX_LABEL_CHARS`].
    #[error("option group '{group}' name is {len} characters; the maximum is {MAX_LABEL_CHARS}")]
    NameTooLong {
        /// Offending group id.
        group: String,
        /// Actual name length in characters.
        len: usize,
    },

    /// A value label exceeds [`MAX_LABEL_CHARS`].
    #[error(
        "value '{value}' in group '{group}' has a {len} character label; the maximum is {MAX_LABEL_CHARS}"
    )]
    LabelTooLong {
        /// Owning group id.
        group: String,
        /// Offending value id.
        value: String,
        /// Actual label length in characters.
        len: usize,
    },

    /// A group has no values to choose from.
    #[error("option group '{group}' has no values")]
    NoValues {
        /// Offending group id.
        group: String,
    },

    /// Two groups share the same id.
    #[error("duplicate option group id '{0}'")]
    DuplicateGroup(String),

    /// Two values within one group share the same id.
    #[error("duplicate value id '{value}' in group '{group}'")]
    DuplicateValue {
        /// Owning group id.
        group: String,
        /// Duplicated value id.
        value: String,
    },
}

/// One selectable choice within an option group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionValue {
    /// Opaque identifier, unique within the owning group.
    pub id: String,

    /// Display label shown to the buyer.
    pub label: String,

    /// Signed whole-dirham amount added to the base price when selected.
    pub price_delta: i64,
}

/// A buyer-selectable variant axis with its choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    /// Opaque identifier, unique within the product.
    pub id: String,

    /// Display label (e.g. "Size").
    pub name: String,

    /// Whether a value must be selected before checkout.
    pub required: bool,

    /// Ordered choices; a valid group has at least one.
    pub values: Vec<OptionValue>,
}

impl OptionGroup {
    /// Validate this group's invariants: a non-empty bounded name, at least
    /// one value, bounded labels and unique value ids.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.name.trim().is_empty() {
            return Err(OptionsError::EmptyName {
                group: self.id.clone(),
            });
        }

        let name_len = self.name.chars().count();
        if name_len > MAX_LABEL_CHARS {
            return Err(OptionsError::NameTooLong {
                group: self.id.clone(),
                len: name_len,
            });
        }

        if self.values.is_empty() {
            return Err(OptionsError::NoValues {
                group: self.id.clone(),
            });
        }

        let mut seen = FxHashMap::default();
        for value in &self.values {
            let label_len = value.label.chars().count();
            if label_len > MAX_LABEL_CHARS {
                return Err(OptionsError::LabelTooLong {
                    group: self.id.clone(),
                    value: value.id.clone(),
                    len: label_len,
                });
            }

            if seen.insert(value.id.as_str(), ()).is_some() {
                return Err(OptionsError::DuplicateValue {
                    group: self.id.clone(),
                    value: value.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// The price delta contributed by this group for the given selections.
    ///
    /// Unselected groups and selections pointing at unknown values
    /// contribute 0.
    pub fn delta_for(&self, selections: &Selections) -> i64 {
        selections
            .get(&self.id)
            .and_then(|value_id| self.values.iter().find(|value| &value.id == value_id))
            .map_or(0, |value| value.price_delta)
    }

    /// The smallest price delta across this group's values, or 0 when empty.
    pub fn min_delta(&self) -> i64 {
        self.values
            .iter()
            .map(|value| value.price_delta)
            .min()
            .unwrap_or(0)
    }

    /// The largest price delta across this group's values, or 0 when empty.
    pub fn max_delta(&self) -> i64 {
        self.values
            .iter()
            .map(|value| value.price_delta)
            .max()
            .unwrap_or(0)
    }
}

/// Validate a whole option schema, including group id uniqueness.
///
/// # Errors
///
/// Returns an [`OptionsError`] describing the first violated invariant.
pub fn validate_groups(groups: &[OptionGroup]) -> Result<(), OptionsError> {
    let mut seen = FxHashMap::default();

    for group in groups {
        group.validate()?;

        if seen.insert(group.id.as_str(), ()).is_some() {
            return Err(OptionsError::DuplicateGroup(group.id.clone()));
        }
    }

    Ok(())
}

/// Required groups with no valid selection; a non-empty result blocks checkout.
pub fn missing_required<'a>(groups: &'a [OptionGroup], selections: &Selections) -> Vec<&'a str> {
    groups
        .iter()
        .filter(|group| group.required)
        .filter(|group| {
            selections
                .get(&group.id)
                .is_none_or(|value_id| !group.values.iter().any(|value| &value.id == value_id))
        })
        .map(|group| group.id.as_str())
        .collect()
}

/// One selected option as recorded on an order, in the list shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectedOption {
    /// Group display name at purchase time.
    pub group: String,

    /// Value label at purchase time.
    pub value: String,

    /// Price delta at purchase time, if the writer recorded one.
    #[serde(default)]
    pub price_delta: Option<i64>,
}

/// Options as recorded on an order row.
///
/// The store contains both shapes: a list of `{group, value, priceDelta}`
/// entries and a flat `group -> value` map. Both are resolved into this
/// variant once at the boundary instead of being re-sniffed at every
/// render site.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrderOptions {
    /// List shape, carrying the price delta snapshot per entry.
    List(Vec<SelectedOption>),

    /// Flat map shape, group name to value label.
    Map(FxHashMap<String, String>),
}

impl OrderOptions {
    /// Render the recorded options as `(group, value)` pairs.
    ///
    /// Map-shaped options are sorted by group name so the output is
    /// deterministic.
    pub fn summarize(&self) -> Vec<(String, String)> {
        match self {
            OrderOptions::List(entries) => entries
                .iter()
                .map(|entry| (entry.group.clone(), entry.value.clone()))
                .collect(),
            OrderOptions::Map(map) => {
                let mut pairs: Vec<(String, String)> = map
                    .iter()
                    .map(|(group, value)| (group.clone(), value.clone()))
                    .collect();
                pairs.sort();
                pairs
            }
        }
    }

    /// Whether no options were recorded at all.
    pub fn is_empty(&self) -> bool {
        match self {
            OrderOptions::List(entries) => entries.is_empty(),
            OrderOptions::Map(map) => map.is_empty(),
        }
    }
}
