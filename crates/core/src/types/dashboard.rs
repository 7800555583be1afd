//! Analytics payloads for the dashboard home screen.
//!
//! The backend aggregates these; nothing here is computed locally. The
//! shapes mirror what the stats endpoints emit, so unknown extra fields
//! are simply ignored on decode.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::Order;

/// Headline numbers for the overview cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub active_customers: u64,
    pub conversion_rate: f64,
    /// Period-over-period deltas, as fractions (0.12 = +12%).
    #[serde(default)]
    pub revenue_change: f64,
    #[serde(default)]
    pub orders_change: f64,
    #[serde(default)]
    pub customers_change: f64,
    #[serde(default)]
    pub conversion_change: f64,
}

/// One point on the sales trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    pub date: String,
    pub revenue: Decimal,
    pub orders: u64,
}

/// A recent sale row: who bought, for how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub id: String,
    pub name: String,
    pub email: String,
    pub amount: Decimal,
}

/// Sales standing of a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub product_id: String,
    pub product_name: String,
    pub revenue: Decimal,
    pub units_sold: u64,
}

/// Revenue share of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    pub revenue: Decimal,
    pub percentage: f64,
}

/// Everything the dashboard home screen renders in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub metrics: DashboardMetrics,
    #[serde(default)]
    pub sales_trend: Vec<SalesPoint>,
    #[serde(default)]
    pub recent_sales: Vec<RecentSale>,
    #[serde(default)]
    pub top_products: Vec<ProductPerformance>,
    #[serde(default)]
    pub category_performance: Vec<CategoryPerformance>,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
}

/// Granularity of the sales trend query - a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TrendPeriod {
    /// Wire representation (lowercase).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a trend period from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trend period: {0}")]
pub struct ParseTrendPeriodError(String);

impl FromStr for TrendPeriod {
    type Err = ParseTrendPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(ParseTrendPeriodError(other.to_owned())),
        }
    }
}
