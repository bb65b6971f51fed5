//! Product Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::snapshot::ProductSnapshot;

/// Wrapper for products in YAML.
///
/// Rows use the store's loose snapshot shape, keyed by a stable fixture key.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of fixture key -> product row.
    pub products: FxHashMap<String, ProductSnapshot>,
}
