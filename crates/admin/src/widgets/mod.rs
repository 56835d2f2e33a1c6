//! Read-only dashboard and list-page widgets.

pub mod chart;
pub mod stats;

pub use chart::{ChartData, ChartType, Dataset, OrdersChart};
pub use stats::{OrderStats, ProductStats, Stat, StatsWidget};
