//! Shop product resource.

use serde_json::Value;

use crate::directory::AdminDirectory;
use crate::forms::FormValues;
use crate::models::shop::Product;
use crate::query::Predicate;
use crate::resource::{GloballySearchable, HasNavigationBadge, RelationManagerRef, Resource};
use crate::schema::filter::{Filter, FilterInput, Indicator};
use crate::schema::form::{
    DefaultValue, Field, FormSchema, OptionsSource, Rule, Section, SelectConfig,
};
use crate::schema::table::{BulkAction, Column, RowAction, TableSchema};

/// The product media collection name.
pub const MEDIA_COLLECTION: &str = "product-images";
/// Maximum images per product.
pub const MAX_MEDIA_FILES: u8 = 5;

/// The shop products resource.
pub struct ProductResource;

impl Resource for ProductResource {
    type Record = Product;

    const SLUG: &'static str = "shop/products";
    const RECORD_TITLE_ATTRIBUTE: &'static str = "name";
    const NAVIGATION_GROUP: &'static str = "Shop";
    const NAVIGATION_ICON: &'static str = "heroicon-o-bolt";
    const NAVIGATION_SORT: i32 = 0;

    fn model_label() -> &'static str {
        "Produto"
    }

    fn plural_model_label() -> &'static str {
        "Produtos"
    }

    fn form() -> FormSchema {
        FormSchema::new(3)
            .section(
                Section::new()
                    .columns(2)
                    .field(Field::text("name").label("Nome").required())
                    .field(
                        Field::text("slug")
                            .disabled()
                            .dehydrated()
                            .required()
                            .unique("products", "slug")
                            .derive_slug_from("name"),
                    )
                    .field(
                        Field::markdown("description")
                            .label("Descrição")
                            .span_full(),
                    ),
            )
            .section(
                Section::titled("Imagens")
                    .collapsible()
                    .field(
                        Field::file_upload("media", true, MAX_MEDIA_FILES)
                            .collection(MEDIA_COLLECTION),
                    ),
            )
            .section(
                Section::titled("Preço")
                    .columns(2)
                    .field(Field::numeric("price").rule(Rule::MoneyFormat).required())
                    .field(
                        Field::numeric("old_price")
                            .label("Preço Anterior")
                            .rule(Rule::MoneyFormat)
                            .required(),
                    )
                    .field(
                        Field::numeric("cost")
                            .label("Custo por item")
                            .helper_text("Clientes não verão esse preço.")
                            .rule(Rule::MoneyFormat)
                            .required(),
                    ),
            )
            .section(
                Section::titled("Estoque")
                    .columns(2)
                    .field(
                        Field::text("sku")
                            .label("SKU (Stock Keeping Unit)")
                            .unique("products", "sku")
                            .required(),
                    )
                    .field(
                        Field::text("barcode")
                            .label("Código de Barras (ISBN, UPC, GTIN, etc.)")
                            .unique("products", "barcode")
                            .required(),
                    )
                    .field(
                        Field::numeric("qty")
                            .label("Quantidade")
                            .rule(Rule::NonNegativeInteger)
                            .required(),
                    )
                    .field(
                        Field::numeric("security_stock")
                            .label("Estoque Mínimo")
                            .helper_text(
                                "A quantidade mínima que esse produto deve ter sempre em estoque.",
                            )
                            .rule(Rule::NonNegativeInteger)
                            .required(),
                    ),
            )
            .section(
                Section::titled("Entrega")
                    .columns(3)
                    .field(Field::checkbox("backorder").label("PAC"))
                    .field(Field::checkbox("requires_shipping").label("SEDEX")),
            )
            .section(
                Section::titled("Status")
                    .aside()
                    .field(
                        Field::toggle("is_visible")
                            .label("Publicado?")
                            .default_value(DefaultValue::Static(Value::Bool(true))),
                    )
                    .field(
                        Field::date("published_at")
                            .label("Disponibilidade")
                            .default_value(DefaultValue::Today)
                            .required(),
                    ),
            )
            .section(
                Section::titled("Relações")
                    .aside()
                    .field(
                        Field::select("brand_id", SelectConfig::new(OptionsSource::Brands).searchable())
                            .label("Marca"),
                    )
                    .field(
                        Field::select(
                            "category_ids",
                            SelectConfig::new(OptionsSource::ShopCategories).multiple(),
                        )
                        .label("Categorias")
                        .required(),
                    ),
            )
    }

    fn table() -> TableSchema<Product> {
        TableSchema::new()
            .column(Column::image("product-image", "Imagem").state(first_media))
            .column(Column::text("name", "Nome").searchable().sortable())
            .column(
                Column::text("brand.name", "Marca")
                    .searchable()
                    .sortable()
                    .toggleable()
                    .state(brand_name),
            )
            .column(
                Column::icon_bool("is_visible", "Ativo?").sortable().toggleable(),
            )
            .column(Column::text("price", "Preço").searchable().sortable())
            .column(Column::text("sku", "SKU").searchable().sortable().toggleable())
            .column(Column::text("qty", "Quantidade").searchable().sortable().toggleable())
            .column(
                Column::text("security_stock", "Estoque Mínimo")
                    .searchable()
                    .sortable()
                    .hidden_by_default(),
            )
            .column(
                Column::text("published_at", "Data de Publicação")
                    .date("%d/%m/%Y")
                    .sortable()
                    .hidden_by_default(),
            )
            .filter(brand_filter())
            .filter(visibility_filter())
            .action(RowAction::Edit)
            .bulk_action(BulkAction::delete_with_warning())
    }

    fn relation_managers() -> Vec<RelationManagerRef> {
        vec![RelationManagerRef {
            relationship: "comments",
            title: "Comentários",
        }]
    }

    fn widgets() -> Vec<&'static str> {
        vec!["product-stats"]
    }

    fn record_values(record: &Product) -> FormValues {
        let mut values = FormValues::new()
            .set_str("name", &record.name)
            .set_str("slug", record.slug.as_str())
            .set_str("price", &record.price.to_string())
            .set_str("old_price", &record.old_price.to_string())
            .set_str("cost", &record.cost.to_string())
            .set_str("sku", &record.sku)
            .set_str("barcode", &record.barcode)
            .set("qty", Value::from(record.qty))
            .set("security_stock", Value::from(record.security_stock))
            .set("is_visible", Value::Bool(record.is_visible))
            .set_str("published_at", &record.published_at.format("%Y-%m-%d").to_string())
            .set(
                "category_ids",
                Value::Array(
                    record
                        .category_ids
                        .iter()
                        .map(|id| Value::from(id.as_i32()))
                        .collect(),
                ),
            )
            .set("backorder", Value::Bool(record.backorder))
            .set("requires_shipping", Value::Bool(record.requires_shipping));

        if let Some(description) = &record.description {
            values.insert("description", Value::String(description.clone()));
        }
        if let Some(brand_id) = record.brand_id {
            values.insert("brand_id", Value::from(brand_id.as_i32()));
        }
        values
    }
}

impl HasNavigationBadge for ProductResource {
    /// Count of products below their reorder threshold.
    fn navigation_badge(records: &[Product]) -> Option<String> {
        let count = records
            .iter()
            .filter(|p| p.qty < p.security_stock)
            .count();
        (count > 0).then(|| count.to_string())
    }
}

impl GloballySearchable for ProductResource {
    fn searchable_attributes() -> &'static [&'static str] {
        &["name", "sku", "brand.name"]
    }

    fn attribute_text(
        record: &Product,
        attribute: &str,
        directory: &dyn AdminDirectory,
    ) -> Option<String> {
        match attribute {
            "name" => Some(record.name.clone()),
            "sku" => Some(record.sku.clone()),
            "brand.name" => record.brand_id.and_then(|id| directory.brand_name(id)),
            _ => None,
        }
    }

    fn search_title(record: &Product) -> String {
        record.name.clone()
    }

    fn search_details(
        record: &Product,
        directory: &dyn AdminDirectory,
    ) -> Vec<(&'static str, String)> {
        record
            .brand_id
            .and_then(|id| directory.brand_name(id))
            .map(|name| ("Brand", name))
            .into_iter()
            .collect()
    }
}

fn first_media(record: &Product, _: &dyn AdminDirectory) -> Option<String> {
    record.media.first().map(|m| m.file_name.clone())
}

fn brand_name(record: &Product, directory: &dyn AdminDirectory) -> Option<String> {
    record.brand_id.and_then(|id| directory.brand_name(id))
}

/// Multi-select brand filter.
#[must_use]
pub fn brand_filter() -> Filter {
    Filter::new("brand", apply_brand)
        .field(Field::select(
            "values",
            SelectConfig::new(OptionsSource::Brands).searchable().multiple(),
        ))
        .indicators(indicate_brand)
}

fn apply_brand(input: &FilterInput, query: &mut crate::query::Query) {
    if let Some(ids) = input.get_int_array("values") {
        query.push(Predicate::OneOf {
            column: "brand_id".into(),
            values: ids.into_iter().map(crate::query::FieldValue::Int).collect(),
        });
    }
}

fn indicate_brand(input: &FilterInput, directory: &dyn AdminDirectory) -> Vec<Indicator> {
    input
        .get_int_array("values")
        .map(|ids| {
            ids.into_iter()
                .filter_map(|id| {
                    let id = i32::try_from(id).ok()?;
                    let name = directory.brand_name(mercado_core::BrandId::new(id))?;
                    Some(Indicator::new("values", format!("Marca: {name}")))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Ternary visibility filter: all, only visible, only hidden.
#[must_use]
pub fn visibility_filter() -> Filter {
    Filter::new("is_visible", apply_visibility)
        .field(Field::select(
            "value",
            SelectConfig::new(OptionsSource::Static(vec![
                crate::schema::form::SelectOption::new("true", "Only visible"),
                crate::schema::form::SelectOption::new("false", "Only hidden"),
            ]))
            .not_native(),
        ))
        .indicators(indicate_visibility)
}

fn apply_visibility(input: &FilterInput, query: &mut crate::query::Query) {
    match input.get_bool("value") {
        Some(true) => query.push(Predicate::IsTrue {
            column: "is_visible".into(),
        }),
        Some(false) => query.push(Predicate::IsFalse {
            column: "is_visible".into(),
        }),
        None => {}
    }
}

fn indicate_visibility(input: &FilterInput, _: &dyn AdminDirectory) -> Vec<Indicator> {
    match input.get_bool("value") {
        Some(true) => vec![Indicator::new("value", "Only visible")],
        Some(false) => vec![Indicator::new("value", "Only hidden")],
        None => Vec::new(),
    }
}
