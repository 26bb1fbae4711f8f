use contracts::dashboards::d400_order_summary::{
    OrderSummaryRequest, OrderSummaryResponse, StockThresholds,
};
use contracts::shared::order_lifecycle::aggregate;

use crate::shared::format::format_amount;
use crate::shared::upstream::{OrderSource, UpstreamError};

/// Fetch the current orders and products and aggregate them
pub async fn get_order_summary(
    source: &dyn OrderSource,
    thresholds: StockThresholds,
) -> Result<OrderSummaryResponse, UpstreamError> {
    let (orders, products) = tokio::try_join!(source.fetch_orders(), source.fetch_products())?;

    tracing::debug!(
        "D400: aggregating {} orders and {} products",
        orders.len(),
        products.len()
    );

    let summary = aggregate(&orders, &products, &thresholds);
    tracing::info!(
        "D400: {} orders, revenue {}, delivered revenue {}",
        summary.total_orders,
        format_amount(summary.total_revenue),
        format_amount(summary.delivered_revenue)
    );

    Ok(OrderSummaryResponse::new(summary))
}

/// Aggregate a snapshot supplied by the caller. Bounds missing from the
/// request are taken from `defaults`.
pub fn summarize_snapshot(
    request: OrderSummaryRequest,
    defaults: StockThresholds,
) -> Result<OrderSummaryResponse, String> {
    let thresholds = request.thresholds.apply(defaults);
    thresholds.validate()?;

    let summary = aggregate(&request.orders, &request.products, &thresholds);
    Ok(OrderSummaryResponse::new(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::upstream::testing::FakeSource;
    use contracts::dashboards::d400_order_summary::StockThresholdsOverride;
    use contracts::enums::{OrderState, StockLevel};
    use serde_json::json;

    fn fake() -> FakeSource {
        FakeSource {
            orders: serde_json::from_value(json!([
                {"_id": "1", "total": 500, "product": {"Category": "Clothing"}, "cashadmin": true},
                {"_id": "2", "total": 300, "product": {"Category": "Clothing"}, "status3": "Delivered"},
                {"_id": "3", "total": 100, "cancel": true}
            ]))
            .unwrap(),
            products: serde_json::from_value(json!([
                {"name": "Kurta", "category": "Clothing", "quantityInStock": 0},
                {"name": "Saree", "category": "Clothing", "quantityInStock": 40}
            ]))
            .unwrap(),
            ..FakeSource::default()
        }
    }

    #[tokio::test]
    async fn test_summary_from_source() {
        let response = get_order_summary(&fake(), StockThresholds::default())
            .await
            .unwrap();

        assert_eq!(response.summary.total_orders, 3);
        assert_eq!(response.summary.count(OrderState::Canceled), 1);
        assert_eq!(response.summary.delivered_revenue, 800.0);
        assert_eq!(response.summary.stock_buckets.count(StockLevel::OutOfStock), 1);
        assert_eq!(response.charts.revenue[0].name, "Clothing");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_propagated() {
        let result = get_order_summary(&FakeSource::failing(), StockThresholds::default()).await;
        assert!(matches!(result, Err(UpstreamError::Status { status: 500, .. })));
    }

    #[test]
    fn test_snapshot_uses_request_thresholds() {
        let request: OrderSummaryRequest = serde_json::from_value(json!({
            "products": [{"quantityInStock": 5}],
            "thresholds": {"lowStockMax": 100, "outOfStockMax": 0}
        }))
        .unwrap();

        let response = summarize_snapshot(request, StockThresholds::default()).unwrap();
        assert_eq!(response.summary.stock_buckets.low_stock, 1);
        assert_eq!(response.summary.total_orders, 0);
    }

    #[test]
    fn test_snapshot_rejects_inverted_thresholds() {
        let request = OrderSummaryRequest {
            thresholds: StockThresholdsOverride {
                low_stock_max: Some(1),
                out_of_stock_max: Some(5),
            },
            ..OrderSummaryRequest::default()
        };
        assert!(summarize_snapshot(request, StockThresholds::default()).is_err());
    }
}
