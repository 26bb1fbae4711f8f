use axum::{extract::Path, http::StatusCode, Json};
use contracts::dashboards::d401_order_history::{OrderDetail, OrderListRow};

use super::upstream_status;
use crate::dashboards::d401_order_history::service;
use crate::shared::upstream;

/// GET /api/d401/orders
pub async fn list_orders() -> Result<Json<Vec<OrderListRow>>, StatusCode> {
    let source = upstream::source().map_err(|e| upstream_status(&e))?;

    match service::list_orders(source.as_ref()).await {
        Ok(rows) => {
            tracing::info!("D401: Returning {} orders", rows.len());
            Ok(Json(rows))
        }
        Err(e) => {
            tracing::error!("D401: Failed to list orders: {}", e);
            Err(upstream_status(&e))
        }
    }
}

/// GET /api/d401/orders/by-user/:user_id
pub async fn list_user_orders(
    Path(user_id): Path<String>,
) -> Result<Json<Vec<OrderListRow>>, StatusCode> {
    let source = upstream::source().map_err(|e| upstream_status(&e))?;

    match service::list_user_orders(source.as_ref(), &user_id).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("D401: Failed to list orders of user {}: {}", user_id, e);
            Err(upstream_status(&e))
        }
    }
}

/// GET /api/d401/orders/:id/products
pub async fn get_ordered_products(
    Path(order_id): Path<String>,
) -> Result<Json<OrderDetail>, StatusCode> {
    let source = upstream::source().map_err(|e| upstream_status(&e))?;

    match service::get_ordered_products(source.as_ref(), &order_id).await {
        Ok(detail) => Ok(Json(detail)),
        Err(e) => {
            tracing::error!("D401: Failed to get products of order {}: {}", order_id, e);
            Err(upstream_status(&e))
        }
    }
}
