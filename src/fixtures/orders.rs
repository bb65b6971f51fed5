//! Order Fixtures

use rusty_money::{Money, iso};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    options::OrderOptions,
    orders::{Order, OrderStatus},
    snapshot::parse_timestamp,
};

/// Wrapper for orders in YAML.
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Orders in file order.
    pub orders: Vec<OrderFixture>,
}

/// One order row from YAML.
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order id.
    pub id: String,

    /// Fixture key of the purchased product.
    pub product: String,

    /// Purchased quantity.
    pub qty: u32,

    /// Total charged at purchase time, in whole dirhams.
    pub amount_mad: i64,

    /// Wire status name.
    pub status: String,

    /// Creation timestamp, RFC 3339.
    pub created_at: String,

    /// Buyer free-text, when recorded.
    #[serde(default)]
    pub personalization: Option<String>,

    /// Recorded option selections, in either store shape.
    #[serde(default)]
    pub options: Option<OrderOptions>,

    /// Carrier tracking number.
    #[serde(default)]
    pub tracking_number: Option<String>,

    /// Private seller notes.
    #[serde(default)]
    pub seller_notes: Option<String>,

    /// Whether payment was marked received.
    #[serde(default)]
    pub payment_confirmed: bool,

    /// Whether the stock decrement was already applied.
    #[serde(default)]
    pub stock_decremented: bool,
}

impl OrderFixture {
    /// Resolve the row into a typed [`Order`].
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] for an unknown status name or a
    /// non-RFC 3339 timestamp.
    pub fn resolve(self) -> Result<Order<'static>, FixtureError> {
        let status: OrderStatus = self.status.parse()?;
        let created_at = parse_timestamp(&self.created_at)
            .ok_or_else(|| FixtureError::InvalidTimestamp(self.created_at.clone()))?;

        Ok(Order {
            id: self.id,
            created_at,
            qty: self.qty,
            amount: Money::from_major(self.amount_mad, iso::MAD),
            status,
            product_id: self.product,
            personalization: self.personalization,
            options: self.options,
            tracking_number: self.tracking_number,
            seller_notes: self.seller_notes,
            payment_confirmed: self.payment_confirmed,
            stock_decremented: self.stock_decremented,
        })
    }
}
