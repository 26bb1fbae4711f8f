use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a001_order::Order;
use crate::domain::a002_product::Product;
use crate::enums::{OrderState, StockLevel};

/// Stock level thresholds (inclusive upper bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockThresholds {
    /// Quantity at or below this is low stock
    #[serde(alias = "low_stock_max")]
    pub low_stock_max: i64,
    /// Quantity at or below this is out of stock
    #[serde(alias = "out_of_stock_max")]
    pub out_of_stock_max: i64,
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            low_stock_max: 10,
            out_of_stock_max: 1,
        }
    }
}

impl StockThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.out_of_stock_max > self.low_stock_max {
            return Err(format!(
                "out_of_stock_max ({}) must not exceed low_stock_max ({})",
                self.out_of_stock_max, self.low_stock_max
            ));
        }
        Ok(())
    }
}

/// Partial thresholds from a request; missing bounds come from the defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockThresholdsOverride {
    #[serde(default, alias = "low_stock_max", skip_serializing_if = "Option::is_none")]
    pub low_stock_max: Option<i64>,
    #[serde(default, alias = "out_of_stock_max", skip_serializing_if = "Option::is_none")]
    pub out_of_stock_max: Option<i64>,
}

impl StockThresholdsOverride {
    pub fn apply(&self, defaults: StockThresholds) -> StockThresholds {
        StockThresholds {
            low_stock_max: self.low_stock_max.unwrap_or(defaults.low_stock_max),
            out_of_stock_max: self.out_of_stock_max.unwrap_or(defaults.out_of_stock_max),
        }
    }
}

/// Per-category figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRollup {
    pub category: String,
    pub order_count: u64,
    /// Revenue of Delivered and Completed orders only
    pub delivered_revenue: f64,
    pub product_count: u64,
    pub product_quantity: i64,
}

impl CategoryRollup {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            order_count: 0,
            delivered_revenue: 0.0,
            product_count: 0,
            product_quantity: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBuckets {
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

impl StockBuckets {
    pub fn add(&mut self, level: StockLevel) {
        match level {
            StockLevel::InStock => self.in_stock += 1,
            StockLevel::LowStock => self.low_stock += 1,
            StockLevel::OutOfStock => self.out_of_stock += 1,
        }
    }

    pub fn count(&self, level: StockLevel) -> u64 {
        match level {
            StockLevel::InStock => self.in_stock,
            StockLevel::LowStock => self.low_stock,
            StockLevel::OutOfStock => self.out_of_stock,
        }
    }
}

/// Delivered orders whose cash has not been handed over to the admin yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCash {
    pub orders: u64,
    pub amount: f64,
}

/// Result of one aggregation over an orders/products snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total_orders: u64,
    /// Always holds every state, zero when no order resolved to it
    pub counts_by_state: BTreeMap<OrderState, u64>,
    pub revenue_by_state: BTreeMap<OrderState, f64>,
    pub total_revenue: f64,
    /// Sum of `delivered_revenue` over all categories
    pub delivered_revenue: f64,
    pub total_ordered_products: i64,
    pub cash_settled_orders: u64,
    pub pending_cash_to_admin: PendingCash,
    /// Sorted by category name
    pub category_rollups: Vec<CategoryRollup>,
    pub stock_buckets: StockBuckets,
    pub total_products: u64,
    pub total_product_quantity: i64,
}

impl Default for OrderSummary {
    fn default() -> Self {
        Self {
            total_orders: 0,
            counts_by_state: OrderState::all().into_iter().map(|s| (s, 0)).collect(),
            revenue_by_state: OrderState::all().into_iter().map(|s| (s, 0.0)).collect(),
            total_revenue: 0.0,
            delivered_revenue: 0.0,
            total_ordered_products: 0,
            cash_settled_orders: 0,
            pending_cash_to_admin: PendingCash::default(),
            category_rollups: Vec::new(),
            stock_buckets: StockBuckets::default(),
            total_products: 0,
            total_product_quantity: 0,
        }
    }
}

impl OrderSummary {
    pub fn count(&self, state: OrderState) -> u64 {
        self.counts_by_state.get(&state).copied().unwrap_or(0)
    }

    pub fn revenue_rows(&self) -> Vec<CategoryRevenueRow> {
        self.category_rollups
            .iter()
            .map(|c| CategoryRevenueRow {
                name: c.category.clone(),
                revenue: c.delivered_revenue,
            })
            .collect()
    }

    pub fn order_rows(&self) -> Vec<CategoryOrdersRow> {
        self.category_rollups
            .iter()
            .map(|c| CategoryOrdersRow {
                name: c.category.clone(),
                orders: c.order_count,
            })
            .collect()
    }

    pub fn product_rows(&self) -> Vec<CategoryProductsRow> {
        self.category_rollups
            .iter()
            .filter(|c| c.product_count > 0)
            .map(|c| CategoryProductsRow {
                name: c.category.clone(),
                products: c.product_count,
                quantity: c.product_quantity,
            })
            .collect()
    }

    pub fn stock_rows(&self) -> Vec<StockRow> {
        StockLevel::all()
            .into_iter()
            .map(|level| StockRow {
                name: level.label().to_string(),
                value: self.stock_buckets.count(level),
                color: level.color().to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenueRow {
    pub name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOrdersRow {
    pub name: String,
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProductsRow {
    pub name: String,
    pub products: u64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    pub name: String,
    pub value: u64,
    pub color: String,
}

/// Rows ready for the dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCharts {
    pub revenue: Vec<CategoryRevenueRow>,
    pub orders: Vec<CategoryOrdersRow>,
    pub products: Vec<CategoryProductsRow>,
    pub stock: Vec<StockRow>,
}

impl SummaryCharts {
    pub fn from_summary(summary: &OrderSummary) -> Self {
        Self {
            revenue: summary.revenue_rows(),
            orders: summary.order_rows(),
            products: summary.product_rows(),
            stock: summary.stock_rows(),
        }
    }
}

/// Request body for aggregating a caller-supplied snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryRequest {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub thresholds: StockThresholdsOverride,
}

/// Response for order summary dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummaryResponse {
    pub summary: OrderSummary,
    pub charts: SummaryCharts,
}

impl OrderSummaryResponse {
    pub fn new(summary: OrderSummary) -> Self {
        let charts = SummaryCharts::from_summary(&summary);
        Self { summary, charts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_thresholds_in_request() {
        let request: OrderSummaryRequest =
            serde_json::from_value(json!({"thresholds": {"lowStockMax": 5}})).unwrap();
        let defaults = StockThresholds {
            low_stock_max: 20,
            out_of_stock_max: 2,
        };

        let thresholds = request.thresholds.apply(defaults);
        assert_eq!(thresholds.low_stock_max, 5);
        assert_eq!(thresholds.out_of_stock_max, 2);
    }

    #[test]
    fn test_override_accepts_snake_case_and_empty() {
        let snake: StockThresholdsOverride =
            serde_json::from_value(json!({"out_of_stock_max": 0})).unwrap();
        assert_eq!(snake.out_of_stock_max, Some(0));
        assert_eq!(snake.low_stock_max, None);

        let empty = OrderSummaryRequest::default();
        assert_eq!(
            empty.thresholds.apply(StockThresholds::default()),
            StockThresholds::default()
        );
    }

    #[test]
    fn test_partial_thresholds_object_decodes() {
        let thresholds: StockThresholds =
            serde_json::from_value(json!({"outOfStockMax": 0})).unwrap();
        assert_eq!(thresholds.out_of_stock_max, 0);
        assert_eq!(thresholds.low_stock_max, 10);
    }
}
