use std::collections::BTreeMap;

use crate::dashboards::d400_order_summary::{CategoryRollup, OrderSummary, StockThresholds};
use crate::domain::a001_order::Order;
use crate::domain::a002_product::Product;
use crate::enums::{OrderState, StockLevel};

use super::status::resolve;

/// Bucket for orders and products without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

fn category_key(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNCATEGORIZED)
        .to_string()
}

fn rollup_entry<'a>(
    rollups: &'a mut BTreeMap<String, CategoryRollup>,
    category: String,
) -> &'a mut CategoryRollup {
    rollups
        .entry(category)
        .or_insert_with_key(|name| CategoryRollup::new(name.clone()))
}

/// Classify a stock quantity. Out-of-stock is checked first, so inverted
/// thresholds still yield a deterministic bucket.
pub fn classify_stock(quantity: i64, thresholds: &StockThresholds) -> StockLevel {
    if quantity <= thresholds.out_of_stock_max {
        StockLevel::OutOfStock
    } else if quantity <= thresholds.low_stock_max {
        StockLevel::LowStock
    } else {
        StockLevel::InStock
    }
}

/// Split of an order's revenue between categories.
///
/// Multi-product orders contribute `quantity × price` of each line to that
/// line's category; a line without a category falls back to the order's own
/// category. Single-product orders contribute their whole amount.
pub fn revenue_shares(order: &Order) -> Vec<(String, f64)> {
    if order.items.is_empty() {
        return vec![(category_key(order.primary_category()), order.amount())];
    }
    order
        .items
        .iter()
        .map(|line| {
            (
                category_key(line.category().or(order.category.as_deref())),
                line.line_total(),
            )
        })
        .collect()
}

/// Aggregate a snapshot of orders and products into dashboard figures.
///
/// Pure: the result depends on the arguments only. Partial or empty input
/// yields a partial or zeroed summary.
pub fn aggregate(
    orders: &[Order],
    products: &[Product],
    thresholds: &StockThresholds,
) -> OrderSummary {
    let mut summary = OrderSummary::default();
    let mut rollups: BTreeMap<String, CategoryRollup> = BTreeMap::new();

    for order in orders {
        let state = resolve(order).state;
        let amount = order.amount();

        summary.total_orders += 1;
        *summary.counts_by_state.entry(state).or_insert(0) += 1;
        *summary.revenue_by_state.entry(state).or_insert(0.0) += amount;
        summary.total_revenue += amount;
        summary.total_ordered_products = summary
            .total_ordered_products
            .saturating_add(order.ordered_units());

        match state {
            OrderState::Completed => summary.cash_settled_orders += 1,
            OrderState::Delivered => {
                summary.pending_cash_to_admin.orders += 1;
                summary.pending_cash_to_admin.amount += amount;
            }
            _ => {}
        }

        // One order, one category for counting; revenue may be split
        rollup_entry(&mut rollups, category_key(order.primary_category())).order_count += 1;

        if state.is_fulfilled() {
            for (category, share) in revenue_shares(order) {
                rollup_entry(&mut rollups, category).delivered_revenue += share;
            }
        }
    }

    for product in products {
        let quantity = product.stock();
        summary.stock_buckets.add(classify_stock(quantity, thresholds));
        summary.total_products += 1;
        summary.total_product_quantity = summary.total_product_quantity.saturating_add(quantity);

        let rollup = rollup_entry(&mut rollups, category_key(product.category.as_deref()));
        rollup.product_count += 1;
        rollup.product_quantity = rollup.product_quantity.saturating_add(quantity);
    }

    summary.category_rollups = rollups.into_values().collect();
    summary.delivered_revenue = summary
        .category_rollups
        .iter()
        .map(|c| c.delivered_revenue)
        .sum();

    summary
}
