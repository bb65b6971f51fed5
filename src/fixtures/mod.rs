//! Fixtures
//!
//! YAML-backed product and order sets for demos and integration tests. The
//! product files reuse the store's loose row shape, so loading a fixture
//! also exercises boundary resolution.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    orders::{Order, status::UnknownStatus},
    products::Product,
    snapshot::SnapshotError,
};

mod orders;
mod products;

pub use orders::OrderFixture;
pub use products::ProductsFixture;

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files.
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product row did not resolve.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// An order carried an unknown status name.
    #[error(transparent)]
    Status(#[from] UnknownStatus),

    /// An order timestamp was not RFC 3339.
    #[error("invalid order timestamp: {0}")]
    InvalidTimestamp(String),

    /// An order referenced a product key that was not loaded.
    #[error("product not found: {0}")]
    ProductNotFound(String),
}

/// A loaded fixture set.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files.
    base_path: PathBuf,

    /// Resolved products keyed by fixture key.
    products: FxHashMap<String, Product<'static>>,

    /// Resolved orders, in file order.
    orders: Vec<Order<'static>>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            orders: Vec::new(),
        }
    }

    /// Load the named set's products and orders from the default base path.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if either file cannot be read, parsed, or
    /// resolved.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();
        fixture.load_products(name)?;
        fixture.load_orders(name)?;

        Ok(fixture)
    }

    /// Load products from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read, parsed, or a
    /// row does not resolve to a product.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, snapshot) in fixture.products {
            let mut product = snapshot.resolve()?;
            if product.name.is_empty() {
                product.name.clone_from(&key);
            }

            self.products.insert(key, product);
        }

        Ok(self)
    }

    /// Load orders from a YAML fixture file.
    ///
    /// Products must be loaded first so order references can be checked.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed, an
    /// order references an unloaded product, or a field does not resolve.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: orders::OrdersFixture = serde_norway::from_str(&contents)?;

        for order_fixture in fixture.orders {
            if !self.products.contains_key(&order_fixture.product) {
                return Err(FixtureError::ProductNotFound(order_fixture.product));
            }

            self.orders.push(order_fixture.resolve()?);
        }

        Ok(self)
    }

    /// Look up a resolved product by fixture key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] for an unknown key.
    pub fn product(&self, key: &str) -> Result<&Product<'static>, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// All resolved products, keyed by fixture key.
    pub fn products(&self) -> &FxHashMap<String, Product<'static>> {
        &self.products
    }

    /// Fixture keys in sorted order, for deterministic iteration.
    pub fn product_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.products.keys().map(String::as_str).collect();
        keys.sort_unstable();

        keys
    }

    /// All resolved orders, in file order.
    pub fn orders(&self) -> &[Order<'static>] {
        &self.orders
    }
}
