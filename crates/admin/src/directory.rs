//! Lookup seams between resource descriptors and the outside world.
//!
//! The admin layer never touches a database. Everything it needs from
//! persistence or reference data comes through these traits: related-record
//! names for display, the product catalog for the order items repeater, the
//! currency table for the order form, and the uniqueness probe backing
//! `unique` validation rules.
//!
//! Every lookup returns `Option` or an empty list. A missing relation (a
//! since-deleted brand, an unknown currency code) renders blank; it never
//! fails a page.

use mercado_core::{AuthorId, BrandId, CategoryId, CustomerId, PostId, ProductId};
use rust_decimal::Decimal;

/// Read access to related records and reference data.
///
/// Implemented by the hosting application on top of its ORM. All methods
/// have empty defaults so test fixtures only implement what they use.
pub trait AdminDirectory {
    /// Blog author name, for the posts table and global search.
    fn author_name(&self, id: AuthorId) -> Option<String> {
        let _ = id;
        None
    }

    /// Blog category name.
    fn category_name(&self, id: CategoryId) -> Option<String> {
        let _ = id;
        None
    }

    /// Customer name, for order/comment display.
    fn customer_name(&self, id: CustomerId) -> Option<String> {
        let _ = id;
        None
    }

    /// Brand name, for the products table.
    fn brand_name(&self, id: BrandId) -> Option<String> {
        let _ = id;
        None
    }

    /// Product name, for order items and comment notifications.
    fn product_name(&self, id: ProductId) -> Option<String> {
        let _ = id;
        None
    }

    /// Post title, for comment notifications on blog posts.
    fn post_title(&self, id: PostId) -> Option<String> {
        let _ = id;
        None
    }

    /// Current catalog price for a product.
    ///
    /// Read once when a product is selected in the order items repeater;
    /// the returned value is snapshotted onto the item and never re-synced.
    fn product_price(&self, id: ProductId) -> Option<Decimal> {
        let _ = id;
        None
    }

    /// Live product search backing the repeater's product select.
    fn search_products(&self, term: &str) -> Vec<(ProductId, String)> {
        let _ = term;
        Vec::new()
    }

    /// All blog authors, for the post form's author select.
    fn authors(&self) -> Vec<(AuthorId, String)> {
        Vec::new()
    }

    /// All blog categories, for the post form's category select.
    fn blog_categories(&self) -> Vec<(CategoryId, String)> {
        Vec::new()
    }

    /// All brands, for the product form and the brand filter.
    fn brands(&self) -> Vec<(BrandId, String)> {
        Vec::new()
    }

    /// All shop categories, for the product form's categories select.
    fn shop_categories(&self) -> Vec<(mercado_core::ShopCategoryId, String)> {
        Vec::new()
    }

    /// Customer search backing the order form's customer select.
    fn search_customers(&self, term: &str) -> Vec<(CustomerId, String)> {
        let _ = term;
        Vec::new()
    }
}

/// Existence probe backing `unique` validation rules.
///
/// `ignore_record` carries the record under edit so a record never
/// conflicts with itself. The check is check-then-insert; the persistence
/// layer's unique constraint remains the integrity backstop.
pub trait UniquenessProbe {
    /// Whether `entity.column == value` already exists on another record.
    fn exists(&self, entity: &str, column: &str, value: &str, ignore_record: Option<i32>) -> bool;
}

/// Currency reference data (external currency table).
pub trait CurrencyLookup {
    /// Display name for an ISO 4217 code.
    fn currency_name(&self, code: &str) -> Option<&str>;

    /// Case-insensitive search by currency name, for the searchable select.
    fn search(&self, term: &str) -> Vec<(&str, &str)>;
}

/// Bundled ISO 4217 table used when no external currency service is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCurrencies;

/// `(code, name)` pairs, ordered by code.
const CURRENCIES: &[(&str, &str)] = &[
    ("AUD", "Australian Dollar"),
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CLP", "Chilean Peso"),
    ("CNY", "Chinese Yuan"),
    ("COP", "Colombian Peso"),
    ("CZK", "Czech Koruna"),
    ("DKK", "Danish Krone"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("HKD", "Hong Kong Dollar"),
    ("INR", "Indian Rupee"),
    ("JPY", "Japanese Yen"),
    ("KRW", "South Korean Won"),
    ("MXN", "Mexican Peso"),
    ("NOK", "Norwegian Krone"),
    ("NZD", "New Zealand Dollar"),
    ("PEN", "Peruvian Sol"),
    ("PLN", "Polish Zloty"),
    ("SEK", "Swedish Krona"),
    ("SGD", "Singapore Dollar"),
    ("TRY", "Turkish Lira"),
    ("USD", "United States Dollar"),
    ("UYU", "Uruguayan Peso"),
    ("ZAR", "South African Rand"),
];

impl CurrencyLookup for IsoCurrencies {
    fn currency_name(&self, code: &str) -> Option<&str> {
        CURRENCIES
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(_, name)| *name)
    }

    fn search(&self, term: &str) -> Vec<(&str, &str)> {
        let term = term.to_lowercase();
        CURRENCIES
            .iter()
            .filter(|(_, name)| name.to_lowercase().contains(&term))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_name_lookup() {
        assert_eq!(IsoCurrencies.currency_name("BRL"), Some("Brazilian Real"));
        assert_eq!(IsoCurrencies.currency_name("brl"), Some("Brazilian Real"));
        assert_eq!(IsoCurrencies.currency_name("XXX"), None);
    }

    #[test]
    fn test_currency_search_is_case_insensitive() {
        let hits = IsoCurrencies.search("real");
        assert!(hits.iter().any(|(code, _)| *code == "BRL"));

        let hits = IsoCurrencies.search("DOLLAR");
        assert!(hits.len() >= 5);
    }

    #[test]
    fn test_directory_defaults_are_null_safe() {
        struct Empty;
        impl AdminDirectory for Empty {}

        assert_eq!(Empty.author_name(AuthorId::new(1)), None);
        assert!(Empty.search_products("chair").is_empty());
        assert!(Empty.brands().is_empty());
    }
}
