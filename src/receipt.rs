//! Receipt
//!
//! Checkout summary for a priced selection, with a tabular rendering for
//! console output.

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

use crate::pricing::Quote;

/// Errors that can occur while building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Failure writing the rendered table.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// Checkout summary for one priced selection.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Selected total before any promo.
    subtotal: Money<'a, Currency>,

    /// Amount the buyer pays.
    total: Money<'a, Currency>,

    /// Rounded promo percentage, when a promo applied.
    percent_off: Option<u8>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from a pricing quote.
    pub fn from_quote(quote: &Quote<'a>) -> Self {
        Self {
            subtotal: quote.current_total,
            total: quote.payable(),
            percent_off: quote.percent_off,
        }
    }

    /// Selected total before any promo.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount the buyer pays.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// The amount saved by the promo.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Render the receipt as a table to the given writer.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the savings cannot be computed or the
    /// table cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(vec!["Subtotal".to_string(), self.subtotal.to_string()]);

        let savings = self.savings()?;
        if savings.to_minor_units() > 0 {
            let label = self
                .percent_off
                .map_or_else(|| "Promo savings".to_string(), |p| format!("Promo savings ({p}%)"));

            builder.push_record(vec![label, savings.to_string()]);
        }

        builder.push_record(vec!["Total".to_string(), self.total.to_string()]);

        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(out, "{table}")?;

        Ok(())
    }
}
