//! Order resource flows: generated numbers, the price-snapshot invariant,
//! soft-delete scoping, and the bulk-delete friction warning.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;

use mercado_admin::forms::{self, FormContext, FormValues};
use mercado_admin::query::SoftDeletes;
use mercado_admin::resource::{HasNavigationBadge, Resource};
use mercado_admin::resources::shop::orders::{OrderResource, unit_price_for};
use mercado_admin::schema::filter::{FilterInput, apply_filters};
use mercado_admin::schema::table::BulkBehavior;
use mercado_admin::services::notifications::{NotificationLevel, RecordingNotifier, on_bulk_delete};
use mercado_core::{OrderStatus, ProductId};

use mercado_integration_tests::{FixtureDirectory, FixtureProbe, at_noon, init_tracing, make_order};

fn full_submission() -> FormValues {
    FormValues::new()
        .set("customer_id", serde_json::json!(7))
        .set_str("status", "new")
        .set_str("currency", "BRL")
        .set(
            "items",
            serde_json::json!([{ "product_id": 1, "qty": 1, "unit_price": "10.00" }]),
        )
}

#[test]
fn test_creating_an_order_generates_a_number() {
    init_tracing();
    let schema = OrderResource::form();
    let prepared = forms::prepare(
        &schema,
        &FormContext::Create,
        &full_submission(),
        Utc::now().date_naive(),
    );

    let number = prepared.get_str("number").expect("generated number");
    assert!(number.starts_with("OR-"));
    assert_eq!(number.len(), 9);
    assert!(
        number
            .trim_start_matches("OR-")
            .chars()
            .all(|c| c.is_ascii_digit())
    );

    let probe = FixtureProbe::new();
    assert!(forms::validate(&schema, &prepared, &FormContext::Create, &probe).is_ok());
}

#[test]
fn test_duplicate_order_number_blocks_creation() {
    init_tracing();
    let schema = OrderResource::form();

    let submitted = full_submission().set_str("number", "OR-123456");
    let prepared = forms::prepare(
        &schema,
        &FormContext::Create,
        &submitted,
        Utc::now().date_naive(),
    );

    let probe = FixtureProbe::new().with_row("orders", "number", "OR-123456", 40);
    let err = forms::validate(&schema, &prepared, &FormContext::Create, &probe)
        .expect_err("colliding number must fail");
    assert!(err.get("number").is_some());
}

#[test]
fn test_unit_price_snapshot_survives_catalog_reprice() {
    init_tracing();
    let mut directory = FixtureDirectory::new().with_product(1, "Cadeira", "10.00");

    // Selecting the product snapshots its current price onto the item.
    let snapshot = unit_price_for(&directory, ProductId::new(1));
    assert_eq!(snapshot, "10.00".parse::<Decimal>().expect("decimal"));

    let mut order = make_order(1, "OR-000001", 7, OrderStatus::New, "10.00", at_noon(2024, 3, 1));
    if let Some(item) = order.items.first_mut() {
        item.unit_price = snapshot;
    }

    // The catalog price doubles afterwards.
    directory.reprice_product(1, "20.00");
    assert_eq!(
        unit_price_for(&directory, ProductId::new(1)),
        "20.00".parse::<Decimal>().expect("decimal")
    );

    // The existing item keeps the snapshot.
    let item = order.items.first().expect("one item");
    assert_eq!(item.unit_price, "10.00".parse::<Decimal>().expect("decimal"));
}

#[test]
fn test_order_requires_at_least_one_item() {
    init_tracing();
    let schema = OrderResource::form();
    let submitted = full_submission().set("items", serde_json::json!([]));
    let prepared = forms::prepare(
        &schema,
        &FormContext::Create,
        &submitted,
        Utc::now().date_naive(),
    );

    let err = forms::validate(&schema, &prepared, &FormContext::Create, &FixtureProbe::new())
        .expect_err("empty items must fail");
    assert!(err.get("items").is_some());
}

#[test]
fn test_trashed_scope_is_excluded_by_default() {
    init_tracing();
    let directory = FixtureDirectory::new();
    let mut trashed = make_order(2, "OR-000002", 7, OrderStatus::Cancelled, "50.00", at_noon(2024, 2, 1));
    trashed.deleted_at = Some(at_noon(2024, 2, 15));
    assert!(trashed.is_trashed());

    let orders = vec![
        make_order(1, "OR-000001", 7, OrderStatus::New, "10.00", at_noon(2024, 2, 1)),
        trashed,
    ];

    let table = OrderResource::table();

    // Default: trashed orders are hidden.
    let (query, _) = apply_filters(&table.filters, &BTreeMap::new(), &directory);
    assert_eq!(query.filter_soft_deletable(&orders).len(), 1);

    // "With trashed" shows both; "only trashed" shows one.
    for (choice, expected) in [("with", 2), ("only", 1)] {
        let mut inputs = BTreeMap::new();
        inputs.insert(
            "trashed".to_string(),
            FilterInput::new().set_str("value", choice),
        );
        let (query, _) = apply_filters(&table.filters, &inputs, &directory);
        assert_eq!(query.filter_soft_deletable(&orders).len(), expected);
    }
}

#[test]
fn test_created_range_filter_and_indicators() {
    init_tracing();
    let directory = FixtureDirectory::new();
    let orders = vec![
        make_order(1, "OR-000001", 7, OrderStatus::New, "10.00", at_noon(2024, 1, 10)),
        make_order(2, "OR-000002", 7, OrderStatus::New, "20.00", at_noon(2024, 3, 10)),
    ];

    let table = OrderResource::table();
    let mut inputs = BTreeMap::new();
    inputs.insert(
        "created_at".to_string(),
        FilterInput::new()
            .set_str("created_from", "2024-01-01")
            .set_str("created_until", "2024-01-31"),
    );

    let (query, indicators) = apply_filters(&table.filters, &inputs, &directory);
    let hits = query.filter_soft_deletable(&orders);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.first().map(|o| o.number.as_str()), Some("OR-000001"));

    let labels: Vec<&str> = indicators.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Pedidos de 01/01/2024", "Até 31/01/2024"]);
}

#[test]
fn test_total_price_column_sums_the_page() {
    init_tracing();
    let orders = [
        make_order(1, "OR-000001", 7, OrderStatus::New, "100.00", at_noon(2024, 1, 1)),
        make_order(2, "OR-000002", 7, OrderStatus::New, "925.00", at_noon(2024, 1, 2)),
    ];
    let refs: Vec<&_> = orders.iter().collect();

    let table = OrderResource::table();
    let total = table.column_by_key("total_price").expect("total column");
    assert_eq!(total.summaries(&refs), vec!["1,025.00".to_string()]);
}

#[test]
fn test_navigation_badge_counts_new_orders() {
    init_tracing();
    let orders = vec![
        make_order(1, "OR-000001", 7, OrderStatus::New, "10.00", at_noon(2024, 1, 1)),
        make_order(2, "OR-000002", 7, OrderStatus::New, "10.00", at_noon(2024, 1, 2)),
        make_order(3, "OR-000003", 7, OrderStatus::Shipped, "10.00", at_noon(2024, 1, 3)),
    ];

    assert_eq!(OrderResource::navigation_badge(&orders), Some("2".to_string()));
    assert_eq!(OrderResource::navigation_badge(&[]), None);
}

#[test]
fn test_bulk_delete_warns_but_proceeds() {
    init_tracing();
    let table = OrderResource::table();
    let bulk = table.bulk_actions.first().expect("bulk delete action");
    assert_eq!(bulk.behavior, BulkBehavior::DeleteWithWarning);

    let notifier = RecordingNotifier::new();
    on_bulk_delete(bulk.behavior, &notifier);

    let flashed = notifier.flashed();
    let warning = flashed.first().expect("warning toast");
    assert_eq!(warning.level, NotificationLevel::Warning);
    assert_eq!(
        warning.title,
        "Now, now, don't be cheeky, leave some records for others to play with!"
    );
}
