use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_order_summary::{
    OrderSummaryRequest, OrderSummaryResponse, StockThresholdsOverride,
};

use super::upstream_status;
use crate::dashboards::d400_order_summary::service;
use crate::shared::{config, upstream};

/// GET /api/d400/order_summary?low_stock_max=10&out_of_stock_max=1
pub async fn get_order_summary(
    Query(overrides): Query<StockThresholdsOverride>,
) -> Result<Json<OrderSummaryResponse>, StatusCode> {
    let thresholds = overrides.apply(config::get().stock.thresholds());
    if let Err(e) = thresholds.validate() {
        tracing::warn!("D400 Dashboard: Rejected thresholds: {}", e);
        return Err(StatusCode::BAD_REQUEST);
    }

    let source = upstream::source().map_err(|e| {
        tracing::error!("D400 Dashboard: {}", e);
        upstream_status(&e)
    })?;

    match service::get_order_summary(source.as_ref(), thresholds).await {
        Ok(response) => {
            tracing::info!(
                "D400 Dashboard: Returning summary of {} orders in {} categories",
                response.summary.total_orders,
                response.summary.category_rollups.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to get order summary: {}", e);
            Err(upstream_status(&e))
        }
    }
}

/// POST /api/d400/order_summary
pub async fn post_order_summary(
    Json(request): Json<OrderSummaryRequest>,
) -> Result<Json<OrderSummaryResponse>, StatusCode> {
    tracing::info!(
        "D400 Dashboard: Aggregating supplied snapshot of {} orders, {} products",
        request.orders.len(),
        request.products.len()
    );

    service::summarize_snapshot(request, config::get().stock.thresholds())
        .map(Json)
        .map_err(|e| {
            tracing::warn!("D400 Dashboard: Rejected snapshot: {}", e);
            StatusCode::BAD_REQUEST
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_overrides_defaults() {
        let uri: axum::http::Uri = "/api/d400/order_summary?low_stock_max=20".parse().unwrap();
        let Query(overrides) = Query::<StockThresholdsOverride>::try_from_uri(&uri).unwrap();

        let thresholds = overrides.apply(config::get().stock.thresholds());
        assert_eq!(thresholds.low_stock_max, 20);
        assert_eq!(thresholds.out_of_stock_max, 1);
    }

    #[tokio::test]
    async fn test_post_summary_merges_partial_thresholds() {
        let request: OrderSummaryRequest = serde_json::from_value(json!({
            "products": [{"quantityInStock": 3}],
            "thresholds": {"lowStockMax": 2}
        }))
        .unwrap();

        let Json(response) = post_order_summary(Json(request)).await.unwrap();
        assert_eq!(response.summary.stock_buckets.in_stock, 1);
    }

    #[tokio::test]
    async fn test_post_summary() {
        let request: OrderSummaryRequest = serde_json::from_value(json!({
            "orders": [{"_id": "1", "total": 40, "status3": "Delivered"}]
        }))
        .unwrap();

        let Json(response) = post_order_summary(Json(request)).await.unwrap();
        assert_eq!(response.summary.total_orders, 1);
        assert_eq!(response.summary.pending_cash_to_admin.amount, 40.0);
    }

    #[tokio::test]
    async fn test_post_summary_rejects_inverted_thresholds() {
        let request: OrderSummaryRequest = serde_json::from_value(json!({
            "thresholds": {"lowStockMax": 0, "outOfStockMax": 3}
        }))
        .unwrap();

        let result = post_order_summary(Json(request)).await;
        assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
    }
}
