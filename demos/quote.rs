//! Quote Demo
//!
//! Prices a fixture product for a concrete selection and prints the
//! resulting range, promo state and receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to pick a product by fixture key
//! Use `-s group=value` (repeatable) to select option values

use std::io;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use souk::{
    fixtures::Fixture,
    options::missing_required,
    pricing::quote,
    receipt::Receipt,
    utils::DemoArgs,
};

/// Quote Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;

    let key = match args.product.as_deref() {
        Some(key) => key.to_string(),
        None => fixture
            .product_keys()
            .first()
            .map_or_else(String::new, ToString::to_string),
    };
    let product = fixture.product(&key)?;

    let selections = args.selections();
    let unmet = missing_required(&product.groups, &selections);
    if !unmet.is_empty() {
        println!("note: required groups without a selection: {}", unmet.join(", "));
    }

    let quote = quote(product, &selections, Utc::now())?;

    println!("{} ({key})", product.name);
    if quote.is_single_price() {
        println!("price: {}", quote.min_total);
    } else {
        println!("price range: {} - {}", quote.min_total, quote.max_total);
    }

    if quote.promo_active {
        println!("promo active");
    }

    Receipt::from_quote(&quote).write_to(io::stdout())?;

    Ok(())
}
