//! Shop domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mercado_core::{
    BrandId, CustomerId, OrderId, OrderItemId, OrderStatus, PaymentId, PaymentMethod,
    PaymentProvider, ProductId, ShopCategoryId, Slug,
};

use crate::query::{FieldAccess, FieldValue, SoftDeletes};
use crate::resource::AdminRecord;

/// A product brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    /// Unique brand ID.
    pub id: BrandId,
    /// Display name.
    pub name: String,
}

/// A shop category (many-to-many with products).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCategory {
    /// Unique category ID.
    pub id: ShopCategoryId,
    /// Display name.
    pub name: String,
}

/// Customer gender, as collected by the inline customer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// A shop customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact email (unique).
    pub email: String,
    /// Phone number, if given.
    pub phone: Option<String>,
    /// Gender, if given.
    pub gender: Option<Gender>,
}

/// One image in a product's media collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Storage identity of the uploaded file.
    pub id: Uuid,
    /// Original file name.
    pub file_name: String,
    /// Position within the collection.
    pub position: u8,
}

/// A shop product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug, derived from the name at creation and frozen after.
    pub slug: Slug,
    /// Markdown description.
    pub description: Option<String>,
    /// Current sale price.
    pub price: Decimal,
    /// Previous price, shown struck through.
    pub old_price: Decimal,
    /// Cost per item; never shown to customers.
    pub cost: Decimal,
    /// Stock keeping unit (unique).
    pub sku: String,
    /// Barcode - ISBN, UPC, GTIN (unique).
    pub barcode: String,
    /// Units in stock.
    pub qty: u32,
    /// Reorder threshold; stock below this flags the product.
    pub security_stock: u32,
    /// Brand reference, if any.
    pub brand_id: Option<BrandId>,
    /// Category references.
    pub category_ids: Vec<ShopCategoryId>,
    /// Published on the storefront.
    pub is_visible: bool,
    /// Availability date.
    pub published_at: NaiveDate,
    /// Image collection, ordered, at most five.
    pub media: Vec<MediaItem>,
    /// Can be ordered while out of stock.
    pub backorder: bool,
    /// Needs physical shipping.
    pub requires_shipping: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AdminRecord for Product {
    fn record_key(&self) -> i32 {
        self.id.as_i32()
    }
}

impl FieldAccess for Product {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "name" => Some(FieldValue::Str(self.name.clone())),
            "slug" => Some(FieldValue::Str(self.slug.as_str().to_string())),
            "price" => Some(FieldValue::Decimal(self.price)),
            "old_price" => Some(FieldValue::Decimal(self.old_price)),
            "cost" => Some(FieldValue::Decimal(self.cost)),
            "sku" => Some(FieldValue::Str(self.sku.clone())),
            "barcode" => Some(FieldValue::Str(self.barcode.clone())),
            "qty" => Some(FieldValue::Int(i64::from(self.qty))),
            "security_stock" => Some(FieldValue::Int(i64::from(self.security_stock))),
            "brand_id" => self
                .brand_id
                .map(|id| FieldValue::Int(i64::from(id.as_i32()))),
            "is_visible" => Some(FieldValue::Bool(self.is_visible)),
            "published_at" => Some(FieldValue::Date(self.published_at)),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            _ => None,
        }
    }
}

/// A shipping address captured on the order form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    /// Street and number.
    pub street: String,
    /// Postal code.
    pub zip: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country.
    pub country: String,
}

/// A line item on an order.
///
/// `unit_price` is snapshotted from the product's catalog price when the
/// item is added; later catalog changes never rewrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Unique item ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Product reference.
    pub product_id: ProductId,
    /// Quantity ordered (at least one).
    pub qty: u32,
    /// Price per unit at the time the item was added.
    pub unit_price: Decimal,
    /// Position in the repeater's ordering.
    pub position: u32,
}

impl OrderItem {
    /// Line total (`qty * unit_price`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.qty) * self.unit_price
    }
}

/// A shop order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Human-facing order number (`OR-` + six digits, unique).
    pub number: String,
    /// Ordering customer.
    pub customer_id: CustomerId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Order total.
    pub total_price: Decimal,
    /// Shipping cost.
    pub shipping_price: Decimal,
    /// Shipping address.
    pub address: Address,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AdminRecord for Order {
    fn record_key(&self) -> i32 {
        self.id.as_i32()
    }
}

impl SoftDeletes for Order {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl FieldAccess for Order {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "number" => Some(FieldValue::Str(self.number.clone())),
            "customer_id" => Some(FieldValue::Int(i64::from(self.customer_id.as_i32()))),
            "status" => Some(FieldValue::Str(self.status.to_string())),
            "currency" => Some(FieldValue::Str(self.currency.clone())),
            "total_price" => Some(FieldValue::Decimal(self.total_price)),
            "shipping_price" => Some(FieldValue::Decimal(self.shipping_price)),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
            _ => None,
        }
    }
}

/// A payment against an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment ID.
    pub id: PaymentId,
    /// Owning order.
    pub order_id: OrderId,
    /// Provider-side reference.
    pub reference: String,
    /// Amount paid.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Payment provider.
    pub provider: PaymentProvider,
    /// Payment method.
    pub method: PaymentMethod,
}

impl AdminRecord for Payment {
    fn record_key(&self) -> i32 {
        self.id.as_i32()
    }
}

impl FieldAccess for Payment {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "reference" => Some(FieldValue::Str(self.reference.clone())),
            "amount" => Some(FieldValue::Decimal(self.amount)),
            "currency" => Some(FieldValue::Str(self.currency.clone())),
            "provider" => Some(FieldValue::Str(self.provider.to_string())),
            "method" => Some(FieldValue::Str(self.method.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: OrderItemId::new(1),
            order_id: OrderId::new(1),
            product_id: ProductId::new(1),
            qty: 3,
            unit_price: "10.50".parse().unwrap(),
            position: 0,
        };
        assert_eq!(item.line_total(), "31.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_product_field_access_maps_optional_brand() {
        let product = product_fixture(None);
        assert_eq!(product.field("brand_id"), None);

        let product = product_fixture(Some(BrandId::new(4)));
        assert_eq!(product.field("brand_id"), Some(FieldValue::Int(4)));
    }

    fn product_fixture(brand_id: Option<BrandId>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Cadeira".into(),
            slug: Slug::from_title("Cadeira"),
            description: None,
            price: Decimal::from(100),
            old_price: Decimal::from(120),
            cost: Decimal::from(60),
            sku: "SKU-1".into(),
            barcode: "789".into(),
            qty: 5,
            security_stock: 2,
            brand_id,
            category_ids: vec![],
            is_visible: true,
            published_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            media: vec![],
            backorder: false,
            requires_shipping: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
