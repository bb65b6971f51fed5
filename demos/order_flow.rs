//! Order Flow Demo
//!
//! Walks the fixture orders through their lifecycle: prints each order's
//! allowed next statuses, then advances the first pending order all the way
//! to delivered, claiming the stock decrement exactly once.
//!
//! Use `-f` to load a fixture set by name

use anyhow::Result;
use clap::Parser;
use souk::{
    orders::{Actor, Order, OrderStatus},
    prelude::Fixture,
    utils::DemoArgs,
};

/// Order Flow Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;

    for order in fixture.orders() {
        let successors: Vec<&str> = order
            .status
            .successors()
            .iter()
            .map(|status| status.as_str())
            .collect();

        println!(
            "{} [{}] {} x{} -> {}",
            order.id,
            order.status,
            order.product_id,
            order.qty,
            if successors.is_empty() {
                "terminal".to_string()
            } else {
                successors.join(", ")
            }
        );
    }

    let Some(pending) = fixture
        .orders()
        .iter()
        .find(|order| order.status == OrderStatus::Pending)
    else {
        println!("no pending order to advance");
        return Ok(());
    };

    println!("\nadvancing {}:", pending.id);

    let mut current: Order<'_> = pending.clone();
    for next in [
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        current = current.apply_transition(next, Actor::Seller)?;
        println!("  -> {}", current.status);

        if let Some(qty) = current.take_stock_decrement() {
            println!("     stock decrement claimed for {qty} unit(s)");
        }
    }

    Ok(())
}
