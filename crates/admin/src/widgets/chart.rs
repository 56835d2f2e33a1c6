//! Chart widgets.

use chrono::Datelike;

use crate::models::shop::Order;

/// Chart rendering type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
    Bar,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Series label.
    pub label: &'static str,
    /// One value per x-axis label.
    pub data: Vec<u64>,
    /// Fill the area under the line.
    pub fill: bool,
}

/// Chart data in label/dataset form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    /// X-axis labels.
    pub labels: Vec<&'static str>,
    /// Plotted series.
    pub datasets: Vec<Dataset>,
}

/// Month labels for the orders chart.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Orders-per-month line chart for the dashboard.
pub struct OrdersChart;

impl OrdersChart {
    /// Chart heading.
    pub const HEADING: &'static str = "Pedidos por mês";

    /// Dashboard sort position.
    pub const SORT: i32 = 1;

    /// Rendering type.
    #[must_use]
    pub const fn chart_type() -> ChartType {
        ChartType::Line
    }

    /// Bucket the orders created in `year` into monthly counts.
    #[must_use]
    pub fn data(orders: &[&Order], year: i32) -> ChartData {
        let mut counts = [0_u64; 12];
        for order in orders {
            let date = order.created_at.date_naive();
            if date.year() == year {
                let month0 = date.month0() as usize;
                if let Some(slot) = counts.get_mut(month0) {
                    *slot += 1;
                }
            }
        }

        ChartData {
            labels: MONTH_LABELS.to_vec(),
            datasets: vec![Dataset {
                label: "Pedidos",
                data: counts.to_vec(),
                fill: true,
            }],
        }
    }
}
