//! Test fixtures for the Mercado integration suite.
//!
//! The admin layer reaches the outside world through three seams: the
//! [`AdminDirectory`] (related-record lookups), the [`UniquenessProbe`]
//! (unique validation), and the [`Notifier`] (already covered by the
//! recording double in `mercado-admin`). This crate provides in-memory
//! implementations of the first two plus sample-record builders, so tests
//! can drive full resource flows without a database.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::Once;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use mercado_admin::directory::{AdminDirectory, UniquenessProbe};
use mercado_admin::models::blog::{CommentableRef, Post};
use mercado_admin::models::shop::{Address, Order, OrderItem, Product};
use mercado_core::{
    AuthorId, BrandId, CategoryId, CommentId, CustomerId, OrderId, OrderItemId, OrderStatus,
    PostId, ProductId, Slug,
};

static TRACING: Once = Once::new();

/// Install a test tracing subscriber once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// In-memory directory backed by hash maps.
#[derive(Debug, Default)]
pub struct FixtureDirectory {
    pub authors: HashMap<AuthorId, String>,
    pub blog_categories: HashMap<CategoryId, String>,
    pub customers: HashMap<CustomerId, String>,
    pub brands: HashMap<BrandId, String>,
    pub products: HashMap<ProductId, (String, Decimal)>,
    pub post_titles: HashMap<PostId, String>,
}

impl FixtureDirectory {
    /// An empty directory (everything resolves to `None`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an author.
    #[must_use]
    pub fn with_author(mut self, id: i32, name: &str) -> Self {
        self.authors.insert(AuthorId::new(id), name.to_string());
        self
    }

    /// Register a blog category.
    #[must_use]
    pub fn with_blog_category(mut self, id: i32, name: &str) -> Self {
        self.blog_categories
            .insert(CategoryId::new(id), name.to_string());
        self
    }

    /// Register a customer.
    #[must_use]
    pub fn with_customer(mut self, id: i32, name: &str) -> Self {
        self.customers.insert(CustomerId::new(id), name.to_string());
        self
    }

    /// Register a brand.
    #[must_use]
    pub fn with_brand(mut self, id: i32, name: &str) -> Self {
        self.brands.insert(BrandId::new(id), name.to_string());
        self
    }

    /// Register a product with its current catalog price.
    #[must_use]
    pub fn with_product(mut self, id: i32, name: &str, price: &str) -> Self {
        let price = price.parse().expect("fixture price must parse");
        self.products
            .insert(ProductId::new(id), (name.to_string(), price));
        self
    }

    /// Change a product's catalog price in place.
    pub fn reprice_product(&mut self, id: i32, price: &str) {
        if let Some(entry) = self.products.get_mut(&ProductId::new(id)) {
            entry.1 = price.parse().expect("fixture price must parse");
        }
    }
}

impl AdminDirectory for FixtureDirectory {
    fn author_name(&self, id: AuthorId) -> Option<String> {
        self.authors.get(&id).cloned()
    }

    fn category_name(&self, id: CategoryId) -> Option<String> {
        self.blog_categories.get(&id).cloned()
    }

    fn customer_name(&self, id: CustomerId) -> Option<String> {
        self.customers.get(&id).cloned()
    }

    fn brand_name(&self, id: BrandId) -> Option<String> {
        self.brands.get(&id).cloned()
    }

    fn product_name(&self, id: ProductId) -> Option<String> {
        self.products.get(&id).map(|(name, _)| name.clone())
    }

    fn post_title(&self, id: PostId) -> Option<String> {
        self.post_titles.get(&id).cloned()
    }

    fn product_price(&self, id: ProductId) -> Option<Decimal> {
        self.products.get(&id).map(|(_, price)| *price)
    }

    fn search_products(&self, term: &str) -> Vec<(ProductId, String)> {
        let term = term.to_lowercase();
        let mut hits: Vec<(ProductId, String)> = self
            .products
            .iter()
            .filter(|(_, (name, _))| name.to_lowercase().contains(&term))
            .map(|(id, (name, _))| (*id, name.clone()))
            .collect();
        hits.sort_by_key(|(id, _)| id.as_i32());
        hits
    }

    fn brands(&self) -> Vec<(BrandId, String)> {
        let mut all: Vec<(BrandId, String)> = self
            .brands
            .iter()
            .map(|(id, name)| (*id, name.clone()))
            .collect();
        all.sort_by_key(|(id, _)| id.as_i32());
        all
    }
}

/// Uniqueness probe over a fixed conflict set.
#[derive(Debug, Default)]
pub struct FixtureProbe {
    rows: Vec<(String, String, String, i32)>,
}

impl FixtureProbe {
    /// An empty probe (nothing conflicts).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing `entity.column = value` row owned by `record_id`.
    #[must_use]
    pub fn with_row(mut self, entity: &str, column: &str, value: &str, record_id: i32) -> Self {
        self.rows.push((
            entity.to_string(),
            column.to_string(),
            value.to_string(),
            record_id,
        ));
        self
    }
}

impl UniquenessProbe for FixtureProbe {
    fn exists(&self, entity: &str, column: &str, value: &str, ignore_record: Option<i32>) -> bool {
        self.rows.iter().any(|(e, c, v, id)| {
            e == entity && c == column && v == value && Some(*id) != ignore_record
        })
    }
}

/// Noon UTC on the given date.
#[must_use]
pub fn at_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// A post fixture.
#[must_use]
pub fn make_post(
    id: i32,
    title: &str,
    author_id: i32,
    category_id: i32,
    published_at: Option<NaiveDate>,
) -> Post {
    Post {
        id: PostId::new(id),
        title: title.to_string(),
        slug: Slug::from_title(title),
        content: "corpo do post".to_string(),
        author_id: AuthorId::new(author_id),
        category_id: CategoryId::new(category_id),
        published_at,
        tags: vec![],
        image: None,
        created_at: at_noon(2024, 1, 1),
        updated_at: at_noon(2024, 1, 1),
    }
}

/// A product fixture.
#[must_use]
pub fn make_product(id: i32, name: &str, price: &str, qty: u32, security_stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        slug: Slug::from_title(name),
        description: None,
        price: price.parse().expect("fixture price must parse"),
        old_price: price.parse().expect("fixture price must parse"),
        cost: Decimal::ZERO,
        sku: format!("SKU-{id}"),
        barcode: format!("BAR-{id}"),
        qty,
        security_stock,
        brand_id: None,
        category_ids: vec![],
        is_visible: true,
        published_at: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        media: vec![],
        backorder: false,
        requires_shipping: true,
        created_at: at_noon(2024, 1, 1),
        updated_at: at_noon(2024, 1, 1),
    }
}

/// An order fixture with a single line item.
#[must_use]
pub fn make_order(
    id: i32,
    number: &str,
    customer_id: i32,
    status: OrderStatus,
    total: &str,
    created_at: DateTime<Utc>,
) -> Order {
    Order {
        id: OrderId::new(id),
        number: number.to_string(),
        customer_id: CustomerId::new(customer_id),
        status,
        currency: "BRL".to_string(),
        total_price: total.parse().expect("fixture total must parse"),
        shipping_price: Decimal::ZERO,
        address: Address::default(),
        notes: None,
        items: vec![OrderItem {
            id: OrderItemId::new(id * 10),
            order_id: OrderId::new(id),
            product_id: ProductId::new(1),
            qty: 1,
            unit_price: total.parse().expect("fixture total must parse"),
            position: 0,
        }],
        deleted_at: None,
        created_at,
        updated_at: created_at,
    }
}

/// A comment fixture attached to a product.
#[must_use]
pub fn make_product_comment(id: i32, customer_id: i32, product_id: i32) -> mercado_admin::models::blog::Comment {
    mercado_admin::models::blog::Comment {
        id: CommentId::new(id),
        title: "Ótimo produto".to_string(),
        content: "Recomendo.".to_string(),
        customer_id: CustomerId::new(customer_id),
        is_visible: true,
        commentable: CommentableRef::Product(ProductId::new(product_id)),
        created_at: at_noon(2024, 2, 1),
    }
}
