//! Integration tests for the YAML fixture loader, driving the boundary
//! resolution and pricing over the bundled `souk` set.

use std::fs;

use chrono::{TimeZone, Utc};
use rusty_money::{Money, iso};
use testresult::TestResult;

use souk::{
    fixtures::Fixture,
    options::{OrderOptions, Selections},
    orders::OrderStatus,
    pricing::quote,
};

#[test]
fn souk_set_loads_products_and_orders() -> TestResult {
    let fixture = Fixture::from_set("souk")?;

    assert_eq!(
        fixture.product_keys(),
        vec!["berber-wool-rug", "tagine-pot", "zellige-coaster-set"]
    );
    assert_eq!(fixture.orders().len(), 3);

    Ok(())
}

#[test]
fn stringified_store_price_resolves() -> TestResult {
    let fixture = Fixture::from_set("souk")?;

    let tagine = fixture.product("tagine-pot")?;

    assert_eq!(tagine.base_price, Money::from_major(320, iso::MAD));

    Ok(())
}

#[test]
fn coaster_promo_quote_matches_listing_maths() -> TestResult {
    let fixture = Fixture::from_set("souk")?;
    let product = fixture.product("zellige-coaster-set")?;

    let mut selections = Selections::default();
    selections.insert("size".to_string(), "m".to_string());

    let inside_window = Utc
        .with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_default();
    let result = quote(product, &selections, inside_window)?;

    assert_eq!(result.min_total, Money::from_major(200, iso::MAD));
    assert_eq!(result.max_total, Money::from_major(240, iso::MAD));
    assert_eq!(result.current_total, Money::from_major(220, iso::MAD));
    assert!(result.promo_active);
    assert_eq!(result.promo_total, Some(Money::from_major(170, iso::MAD)));
    assert_eq!(result.percent_off, Some(23));

    Ok(())
}

#[test]
fn fixture_orders_resolve_both_option_shapes() -> TestResult {
    let fixture = Fixture::from_set("souk")?;

    let map_shaped = fixture
        .orders()
        .iter()
        .find(|order| order.id == "ord-1001")
        .and_then(|order| order.options.as_ref());
    assert!(matches!(map_shaped, Some(OrderOptions::Map(_))));

    let list_shaped = fixture
        .orders()
        .iter()
        .find(|order| order.id == "ord-1002")
        .and_then(|order| order.options.as_ref());
    assert!(matches!(list_shaped, Some(OrderOptions::List(_))));

    assert_eq!(
        map_shaped.map(OrderOptions::summarize),
        Some(vec![("Size".to_string(), "M".to_string())])
    );

    Ok(())
}

#[test]
fn shipped_fixture_order_keeps_its_decrement_marker() -> TestResult {
    let fixture = Fixture::from_set("souk")?;

    let mut shipped = fixture
        .orders()
        .iter()
        .find(|order| order.id == "ord-1003")
        .cloned()
        .ok_or("ord-1003 missing from fixture")?;

    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.take_stock_decrement(), None);

    Ok(())
}

#[test]
fn order_referencing_unknown_product_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("products"))?;
    fs::create_dir_all(dir.path().join("orders"))?;

    fs::write(
        dir.path().join("products").join("tiny.yml"),
        "products:\n  lantern:\n    price_mad: 90\n",
    )?;
    fs::write(
        dir.path().join("orders").join("tiny.yml"),
        concat!(
            "orders:\n",
            "  - id: ord-1\n",
            "    product: missing-product\n",
            "    qty: 1\n",
            "    amount_mad: 90\n",
            "    status: pending\n",
            "    created_at: \"2026-03-01T00:00:00Z\"\n",
        ),
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());
    fixture.load_products("tiny")?;

    let result = fixture.load_orders("tiny");

    assert!(
        matches!(result, Err(souk::fixtures::FixtureError::ProductNotFound(ref key)) if key == "missing-product"),
        "expected ProductNotFound"
    );

    Ok(())
}

#[test]
fn unknown_status_in_fixture_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("products"))?;
    fs::create_dir_all(dir.path().join("orders"))?;

    fs::write(
        dir.path().join("products").join("tiny.yml"),
        "products:\n  lantern:\n    price_mad: 90\n",
    )?;
    fs::write(
        dir.path().join("orders").join("tiny.yml"),
        concat!(
            "orders:\n",
            "  - id: ord-1\n",
            "    product: lantern\n",
            "    qty: 1\n",
            "    amount_mad: 90\n",
            "    status: refunded\n",
            "    created_at: \"2026-03-01T00:00:00Z\"\n",
        ),
    )?;

    let mut fixture = Fixture::with_base_path(dir.path());
    fixture.load_products("tiny")?;

    assert!(
        matches!(
            fixture.load_orders("tiny"),
            Err(souk::fixtures::FixtureError::Status(_))
        ),
        "expected unknown status error"
    );

    Ok(())
}
