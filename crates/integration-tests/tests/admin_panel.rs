//! Panel-level flows: navigation, page routes, the dashboard chart, the
//! comment notification hook, and configuration.

use mercado_admin::config::PanelConfig;
use mercado_admin::directory::{CurrencyLookup, IsoCurrencies};
use mercado_admin::navigation::{navigation_item, sorted};
use mercado_admin::relation_managers::{CommentsRelationManager, RelationManager};
use mercado_admin::resource::Resource;
use mercado_admin::resources::blog::PostResource;
use mercado_admin::resources::shop::{OrderResource, ProductResource};
use mercado_admin::services::notifications::RecordingNotifier;
use mercado_admin::widgets::{ChartType, OrdersChart};
use mercado_core::{AdminUserId, OrderStatus};

use mercado_integration_tests::{
    FixtureDirectory, at_noon, init_tracing, make_order, make_product, make_product_comment,
};

#[test]
fn test_navigation_orders_groups_and_badges() {
    init_tracing();

    let items = sorted(vec![
        navigation_item::<OrderResource>(Some("3".to_string())),
        navigation_item::<PostResource>(None),
        navigation_item::<ProductResource>(Some("1".to_string())),
    ]);

    let labels: Vec<&str> = items.iter().map(|i| i.label).collect();
    assert_eq!(labels, vec!["Posts", "Produtos", "Pedidos"]);

    let orders = items.last().expect("orders entry");
    assert_eq!(orders.group, "Shop");
    assert_eq!(orders.badge.as_deref(), Some("3"));
    assert_eq!(orders.url, "/shop/orders");
    assert_eq!(orders.icon, "heroicon-o-shopping-bag");
}

#[test]
fn test_resource_page_routes_follow_convention() {
    init_tracing();

    let posts = PostResource::pages();
    assert_eq!(posts.index_url(), "/blog/posts");
    assert_eq!(posts.create_url(), "/blog/posts/create");
    assert_eq!(posts.edit_url(5), "/blog/posts/5/edit");
    assert_eq!(posts.view_url(5).as_deref(), Some("/blog/posts/5"));

    // Orders have no view page.
    let orders = OrderResource::pages();
    assert_eq!(orders.view_url(5), None);
}

#[test]
fn test_orders_chart_buckets_by_month() {
    init_tracing();

    let orders = vec![
        make_order(1, "OR-000001", 1, OrderStatus::New, "10.00", at_noon(2024, 1, 2)),
        make_order(2, "OR-000002", 1, OrderStatus::New, "10.00", at_noon(2024, 1, 28)),
        make_order(3, "OR-000003", 1, OrderStatus::New, "10.00", at_noon(2024, 12, 25)),
        make_order(4, "OR-000004", 1, OrderStatus::New, "10.00", at_noon(2023, 6, 1)),
    ];
    let refs: Vec<&_> = orders.iter().collect();

    let chart = OrdersChart::data(&refs, 2024);
    assert_eq!(OrdersChart::chart_type(), ChartType::Line);
    assert_eq!(OrdersChart::HEADING, "Pedidos por mês");
    assert_eq!(chart.labels.first(), Some(&"Jan"));
    assert_eq!(chart.labels.last(), Some(&"Dez"));

    let data = &chart.datasets.first().expect("series").data;
    assert_eq!(data.first(), Some(&2)); // January
    assert_eq!(data.last(), Some(&1)); // December
    assert_eq!(data.iter().sum::<u64>(), 3); // 2023 order excluded
}

#[test]
fn test_new_comment_notifies_the_acting_admin() {
    init_tracing();

    let directory = FixtureDirectory::new()
        .with_customer(7, "Jane Doe")
        .with_product(2, "Cadeira Azul", "100.00");
    let notifier = RecordingNotifier::new();
    let actor = AdminUserId::new(42);

    let mut product = make_product(2, "Cadeira Azul", "100.00", 10, 2);
    product.is_visible = true;
    let comment = make_product_comment(1, 7, 2);

    CommentsRelationManager::on_child_created(&comment, &product, actor, &directory, &notifier);

    let sent = notifier.database();
    assert_eq!(sent.len(), 1);
    let (recipient, notification) = sent.first().expect("notification");
    assert_eq!(*recipient, actor);
    assert_eq!(notification.title, "New comment");
    assert_eq!(
        notification.body.as_deref(),
        Some("**Jane Doe commented on product (Cadeira Azul).**")
    );
}

#[test]
fn test_comment_visibility_gates_public_only() {
    init_tracing();

    // An unapproved comment still shows in the admin table; the flag is a
    // plain column, not a scope.
    let mut comment = make_product_comment(1, 7, 2);
    comment.is_visible = false;

    let table = CommentsRelationManager::<mercado_admin::models::shop::Product>::table();
    let visibility = table.column_by_key("is_visible").expect("column");
    let directory = FixtureDirectory::new();
    assert_eq!(visibility.display(&comment, &directory).as_deref(), Some("false"));
}

#[test]
fn test_currency_table_backs_the_searchable_select() {
    init_tracing();

    assert_eq!(IsoCurrencies.currency_name("BRL"), Some("Brazilian Real"));
    let hits = IsoCurrencies.search("peso");
    assert!(hits.len() >= 3);
    assert!(hits.iter().all(|(_, name)| name.to_lowercase().contains("peso")));
}

#[test]
fn test_panel_config_defaults() {
    init_tracing();

    let config = PanelConfig::default();
    assert_eq!(config.brand_name, "Mercado");
    assert_eq!(config.default_currency, "BRL");
    assert_eq!(config.records_per_page, 25);
}
