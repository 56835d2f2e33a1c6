//! Shop order resource.

use rust_decimal::Decimal;
use serde_json::Value;

use mercado_core::{OrderStatus, ProductId};

use crate::directory::{AdminDirectory, CurrencyLookup, IsoCurrencies};
use crate::forms::FormValues;
use crate::models::shop::Order;
use crate::query::{Predicate, TrashedScope};
use crate::resource::{GloballySearchable, HasNavigationBadge, RelationManagerRef, Resource};
use crate::schema::filter::{Filter, FilterInput, Indicator};
use crate::schema::form::{
    DefaultValue, Field, FormSchema, OptionsSource, PlaceholderContent, RepeaterConfig, Rule,
    Section, SelectConfig, SelectOption,
};
use crate::schema::table::{
    BadgeColor, BulkAction, Column, GroupSpec, RowAction, Summarizer, TableSchema,
};

/// The shop orders resource.
pub struct OrderResource;

impl Resource for OrderResource {
    type Record = Order;

    const SLUG: &'static str = "shop/orders";
    const RECORD_TITLE_ATTRIBUTE: &'static str = "number";
    const NAVIGATION_GROUP: &'static str = "Shop";
    const NAVIGATION_ICON: &'static str = "heroicon-o-shopping-bag";
    const NAVIGATION_SORT: i32 = 2;

    fn model_label() -> &'static str {
        "Pedido"
    }

    fn plural_model_label() -> &'static str {
        "Pedidos"
    }

    fn form() -> FormSchema {
        let mut details = Section::new()
            .columns(2)
            .field(
                Field::text("number")
                    .label("Número")
                    .default_value(DefaultValue::GeneratedOrderNumber)
                    .disabled()
                    .dehydrated()
                    .required()
                    .unique("orders", "number"),
            )
            .field(
                Field::select(
                    "customer_id",
                    SelectConfig::new(OptionsSource::Customers)
                        .searchable()
                        .create_option("Criar Cliente", customer_form_fields()),
                )
                .label("Cliente")
                .required(),
            )
            .field(
                Field::select(
                    "status",
                    SelectConfig::new(OptionsSource::Static(status_options())).not_native(),
                )
                .required(),
            )
            .field(
                Field::select("currency", SelectConfig::new(OptionsSource::Currencies).searchable())
                    .label("Moeda")
                    .required(),
            );

        for field in address_fields() {
            details = details.field(field);
        }

        details = details.field(
            Field::markdown("notes")
                .label("Anotações")
                .span_full(),
        );

        FormSchema::new(3)
            .section(details)
            .section(Section::titled("Itens do Pedido").field(order_items_repeater()))
            .section(
                Section::new()
                    .aside()
                    .hidden_on_create()
                    .field(
                        Field::placeholder_content("created_at", PlaceholderContent::CreatedAt)
                            .label("Criado"),
                    )
                    .field(
                        Field::placeholder_content("updated_at", PlaceholderContent::UpdatedAt)
                            .label("Modificado"),
                    ),
            )
    }

    fn table() -> TableSchema<Order> {
        TableSchema::new()
            .column(Column::text("number", "Número").searchable().sortable())
            .column(
                Column::text("customer.name", "Cliente")
                    .searchable()
                    .sortable()
                    .toggleable()
                    .state(customer_name),
            )
            .column(
                Column::badge("status", "Status").badge_colors(order_status_color),
            )
            .column(
                Column::text("currency", "Moeda")
                    .searchable()
                    .sortable()
                    .toggleable()
                    .state(currency_name),
            )
            .column(
                Column::text("total_price", "Preço Total")
                    .searchable()
                    .sortable()
                    .summarize(Summarizer::Sum { money: true }),
            )
            .column(
                Column::text("shipping_price", "Valor do Frete")
                    .searchable()
                    .sortable()
                    .toggleable()
                    .summarize(Summarizer::Sum { money: true }),
            )
            .column(Column::text("created_at", "Data do Pedido").date("%d/%m/%Y").toggleable())
            .filter(trashed_filter())
            .filter(created_at_filter())
            .action(RowAction::Edit)
            .bulk_action(BulkAction::delete_with_warning())
            .group(GroupSpec {
                column: "created_at",
                label: "Data do Pedido",
                date: true,
                collapsible: true,
            })
    }

    fn relation_managers() -> Vec<RelationManagerRef> {
        vec![RelationManagerRef {
            relationship: "payments",
            title: "Pagamentos",
        }]
    }

    fn widgets() -> Vec<&'static str> {
        vec!["order-stats"]
    }

    fn record_values(record: &Order) -> FormValues {
        let items: Vec<Value> = record
            .items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "product_id": item.product_id.as_i32(),
                    "qty": item.qty,
                    "unit_price": item.unit_price.to_string(),
                })
            })
            .collect();

        let mut values = FormValues::new()
            .set_str("number", &record.number)
            .set("customer_id", Value::from(record.customer_id.as_i32()))
            .set_str("status", &record.status.to_string())
            .set_str("currency", &record.currency)
            .set_str("street", &record.address.street)
            .set_str("zip", &record.address.zip)
            .set_str("city", &record.address.city)
            .set_str("state", &record.address.state)
            .set_str("country", &record.address.country)
            .set("items", Value::Array(items));

        if let Some(notes) = &record.notes {
            values.insert("notes", Value::String(notes.clone()));
        }
        values
    }
}

impl HasNavigationBadge for OrderResource {
    /// Count of orders still in the `new` status.
    fn navigation_badge(records: &[Order]) -> Option<String> {
        let count = records
            .iter()
            .filter(|o| o.status == OrderStatus::New)
            .count();
        (count > 0).then(|| count.to_string())
    }
}

impl GloballySearchable for OrderResource {
    fn searchable_attributes() -> &'static [&'static str] {
        &["number", "customer.name"]
    }

    fn attribute_text(record: &Order, attribute: &str, directory: &dyn AdminDirectory) -> Option<String> {
        match attribute {
            "number" => Some(record.number.clone()),
            "customer.name" => directory.customer_name(record.customer_id),
            _ => None,
        }
    }

    fn search_title(record: &Order) -> String {
        record.number.clone()
    }

    fn search_details(record: &Order, directory: &dyn AdminDirectory) -> Vec<(&'static str, String)> {
        directory
            .customer_name(record.customer_id)
            .map(|name| ("Customer", name))
            .into_iter()
            .collect()
    }
}

/// The order items repeater.
///
/// Product selection is live-searchable against the catalog; the unit
/// price field is read-only and carries the snapshot taken at selection
/// time. Items can be reordered and at least one is required.
#[must_use]
pub fn order_items_repeater() -> Field {
    let item_fields = vec![
        Field::select(
            "product_id",
            SelectConfig::new(OptionsSource::Products)
                .searchable()
                .reactive(),
        )
        .label("Produto")
        .required(),
        Field::numeric("qty")
            .label("Quantidade")
            .default_value(DefaultValue::Static(Value::from(1)))
            .rule(Rule::IntegerMin(1))
            .required(),
        Field::numeric("unit_price")
            .label("Preço Unidade")
            .disabled()
            .dehydrated()
            .required(),
    ];

    Field::repeater(
        "items",
        RepeaterConfig::new(item_fields)
            .min_items(1)
            .default_items(1)
            .orderable()
            .columns(10),
    )
    .required()
}

/// The unit price snapshot taken when a product is selected in the
/// repeater. Missing products price at zero, matching the original form's
/// fallback; the stored value never re-syncs with the catalog afterwards.
#[must_use]
pub fn unit_price_for(directory: &dyn AdminDirectory, product_id: ProductId) -> Decimal {
    directory.product_price(product_id).unwrap_or_else(|| {
        tracing::warn!(product_id = product_id.as_i32(), "product missing while pricing order item");
        Decimal::ZERO
    })
}

/// Status options, stored value -> display label.
fn status_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("new", "New"),
        SelectOption::new("processing", "Processing"),
        SelectOption::new("shipped", "Shipped"),
        SelectOption::new("delivered", "Delivered"),
        SelectOption::new("cancelled", "Cancelled"),
    ]
}

/// The inline customer creation sub-form on the customer select.
fn customer_form_fields() -> Vec<Field> {
    vec![
        Field::text("name").label("Nome").required(),
        Field::text("email")
            .label("Email")
            .required()
            .rule(Rule::Email)
            .unique("customers", "email"),
        Field::text("phone").label("Telefone"),
        Field::select(
            "gender",
            SelectConfig::new(OptionsSource::Static(vec![
                SelectOption::new("male", "Male"),
                SelectOption::new("female", "Female"),
            ]))
            .not_native(),
        )
        .label("Sexo")
        .with_placeholder("Selecione o gênero")
        .required(),
    ]
}

/// The shipping address field group, spanning the full form width.
fn address_fields() -> Vec<Field> {
    vec![
        Field::text("street").label("Endereço").span_full(),
        Field::text("zip").label("CEP"),
        Field::text("city").label("Cidade"),
        Field::text("state").label("Estado"),
        Field::text("country").label("País"),
    ]
}

fn customer_name(record: &Order, directory: &dyn AdminDirectory) -> Option<String> {
    directory.customer_name(record.customer_id)
}

/// Currency display name from the bundled ISO table; unknown codes render
/// blank.
fn currency_name(record: &Order, _: &dyn AdminDirectory) -> Option<String> {
    IsoCurrencies
        .currency_name(&record.currency)
        .map(ToString::to_string)
}

/// Badge colors: cancelled is red, processing amber, shipped/delivered green.
fn order_status_color(state: &str) -> Option<BadgeColor> {
    match state {
        "cancelled" => Some(BadgeColor::Danger),
        "processing" => Some(BadgeColor::Warning),
        "shipped" | "delivered" => Some(BadgeColor::Success),
        _ => None,
    }
}

/// Soft-delete scope filter.
#[must_use]
pub fn trashed_filter() -> Filter {
    Filter::new("trashed", apply_trashed)
        .field(Field::select(
            "value",
            SelectConfig::new(OptionsSource::Static(vec![
                SelectOption::new("with", "With trashed records"),
                SelectOption::new("only", "Only trashed records"),
            ])),
        ))
        .indicators(indicate_trashed)
}

fn apply_trashed(input: &FilterInput, query: &mut crate::query::Query) {
    query.trashed = match input.get_str("value") {
        Some("with") => TrashedScope::WithTrashed,
        Some("only") => TrashedScope::OnlyTrashed,
        _ => TrashedScope::ExcludeTrashed,
    };
}

fn indicate_trashed(input: &FilterInput, _: &dyn AdminDirectory) -> Vec<Indicator> {
    match input.get_str("value") {
        Some("with") => vec![Indicator::new("value", "With trashed records")],
        Some("only") => vec![Indicator::new("value", "Only trashed records")],
        _ => Vec::new(),
    }
}

/// The order date range filter.
#[must_use]
pub fn created_at_filter() -> Filter {
    Filter::new("created_at", apply_created_range)
        .field(Field::date("created_from"))
        .field(Field::date("created_until"))
        .indicators(indicate_created_range)
}

fn apply_created_range(input: &FilterInput, query: &mut crate::query::Query) {
    if let Some(date) = input.get_date("created_from") {
        query.push(Predicate::DateOnOrAfter {
            column: "created_at".into(),
            date,
        });
    }
    if let Some(date) = input.get_date("created_until") {
        query.push(Predicate::DateOnOrBefore {
            column: "created_at".into(),
            date,
        });
    }
}

fn indicate_created_range(input: &FilterInput, _: &dyn AdminDirectory) -> Vec<Indicator> {
    let mut indicators = Vec::new();
    if let Some(date) = input.get_date("created_from") {
        indicators.push(Indicator::new(
            "created_from",
            format!("Pedidos de {}", date.format("%d/%m/%Y")),
        ));
    }
    if let Some(date) = input.get_date("created_until") {
        indicators.push(Indicator::new(
            "created_until",
            format!("Até {}", date.format("%d/%m/%Y")),
        ));
    }
    indicators
}
