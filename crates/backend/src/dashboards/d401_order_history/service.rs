use contracts::dashboards::d401_order_history::{OrderDetail, OrderListRow};
use contracts::domain::a001_order::Order;
use contracts::shared::order_lifecycle::sort_by_date_desc;

use crate::shared::upstream::{OrderSource, UpstreamError};

fn to_rows(orders: &[Order]) -> Vec<OrderListRow> {
    sort_by_date_desc(orders)
        .iter()
        .map(OrderListRow::from_order)
        .collect()
}

/// Все заказы магазина, новые сверху
pub async fn list_orders(source: &dyn OrderSource) -> Result<Vec<OrderListRow>, UpstreamError> {
    let orders = source.fetch_orders().await?;
    Ok(to_rows(&orders))
}

/// Orders of one customer, newest first
pub async fn list_user_orders(
    source: &dyn OrderSource,
    user_id: &str,
) -> Result<Vec<OrderListRow>, UpstreamError> {
    let orders = source.fetch_user_orders(user_id).await?;
    tracing::debug!("D401: user {} has {} orders", user_id, orders.len());
    Ok(to_rows(&orders))
}

pub async fn get_ordered_products(
    source: &dyn OrderSource,
    order_id: &str,
) -> Result<OrderDetail, UpstreamError> {
    let lines = source.fetch_ordered_products(order_id).await?;
    Ok(OrderDetail::from_lines(order_id, &lines))
}
