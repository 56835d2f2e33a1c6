//! Stats-overview widgets.
//!
//! Stats are computed over the record set the paired list page is currently
//! showing - after filters and search - so the numbers always agree with
//! the table beneath them. No mutation, purely derived display.

use mercado_core::OrderStatus;
use rust_decimal::Decimal;

use crate::format::format_average;
use crate::models::shop::{Order, Product};
use crate::query::{avg_column, sum_column};

/// One stat tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    /// Tile label.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
}

impl Stat {
    /// Create a stat tile.
    #[must_use]
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A widget producing stat tiles from the current filtered record set.
pub trait StatsWidget {
    /// The record type the widget aggregates.
    type Record;

    /// Compute the tiles.
    fn stats(records: &[&Self::Record]) -> Vec<Stat>;
}

/// Product list stats: count, total stock, average price.
pub struct ProductStats;

impl StatsWidget for ProductStats {
    type Record = Product;

    fn stats(records: &[&Product]) -> Vec<Stat> {
        let total = records.len();
        let stock = sum_column(records.iter().copied(), "qty");
        let avg_price = avg_column(records.iter().copied(), "price").unwrap_or(Decimal::ZERO);

        vec![
            Stat::new("Total de Produtos", total.to_string()),
            Stat::new("Estoque Total", stock.to_string()),
            Stat::new("Preço Médio", format_average(avg_price)),
        ]
    }
}

/// Order list stats: count, new orders, average order total.
pub struct OrderStats;

impl StatsWidget for OrderStats {
    type Record = Order;

    fn stats(records: &[&Order]) -> Vec<Stat> {
        let total = records.len();
        let open = records
            .iter()
            .filter(|o| o.status == OrderStatus::New)
            .count();
        let avg_total = avg_column(records.iter().copied(), "total_price").unwrap_or(Decimal::ZERO);

        vec![
            Stat::new("Total de Pedidos", total.to_string()),
            Stat::new("Pedidos Novos", open.to_string()),
            Stat::new("Preço Médio", format_average(avg_total)),
        ]
    }
}
