//! Personalization
//!
//! Seller-defined rules for the free-text customization a buyer can attach
//! to a purchase.

use thiserror::Error;

/// Maximum length, in characters, of the seller's instructions text.
pub const MAX_INSTRUCTIONS_CHARS: usize = 300;

/// Errors raised while validating a personalization config at save time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersonalizationError {
    /// Personalization is enabled but no instructions were provided.
    #[error("personalization is enabled but the buyer instructions are empty")]
    MissingInstructions,

    /// The instructions exceed [`MAX_INSTRUCTIONS_CHARS`].
    #[error(
        "personalization instructions are {0} characters; the maximum is {MAX_INSTRUCTIONS_CHARS}"
    )]
    InstructionsTooLong(usize),

    /// The buyer input bound is zero.
    #[error("personalization max length must be a positive number of characters")]
    InvalidMaxChars,
}

/// Rules bounding the free-text field attached to a purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalizationConfig {
    /// Gate; when false the other fields are not enforced and buyer input
    /// is ignored.
    pub enabled: bool,

    /// Text shown to the buyer explaining what to enter.
    pub instructions: String,

    /// Upper bound on buyer input length, in characters. 0 means unset.
    pub max_chars: usize,
}

impl PersonalizationConfig {
    /// Validate the config; gates saving or publishing the product.
    ///
    /// A disabled config is always valid.
    ///
    /// # Errors
    ///
    /// Returns a [`PersonalizationError`] describing the first violated
    /// invariant.
    pub fn validate(&self) -> Result<(), PersonalizationError> {
        if !self.enabled {
            return Ok(());
        }

        if self.instructions.trim().is_empty() {
            return Err(PersonalizationError::MissingInstructions);
        }

        let len = self.instructions.chars().count();
        if len > MAX_INSTRUCTIONS_CHARS {
            return Err(PersonalizationError::InstructionsTooLong(len));
        }

        if self.max_chars == 0 {
            return Err(PersonalizationError::InvalidMaxChars);
        }

        Ok(())
    }

    /// The bounded buyer input to carry onto the order, or `None` when
    /// personalization is disabled.
    pub fn accept_input<'t>(&self, input: &'t str) -> Option<&'t str> {
        self.enabled.then(|| clamp_input(input, self.max_chars))
    }
}

/// Truncate buyer input to at most `max_chars` characters.
///
/// Counts characters rather than bytes, so multi-byte input is cut on a
/// character boundary. Never panics.
pub fn clamp_input(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((boundary, _)) => input.get(..boundary).unwrap_or(input),
        None => input,
    }
}
