use serde::{Deserialize, Serialize};

use crate::domain::a001_order::{Order, OrderLine};
use crate::enums::OrderState;
use crate::shared::order_lifecycle::{resolve, timeline, TimelineEvent};

/// Resolved status together with its badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusView {
    pub state: OrderState,
    pub label: String,
    pub timestamp: Option<String>,
    pub icon: String,
    pub color: String,
}

impl OrderStatusView {
    pub fn from_order(order: &Order) -> Self {
        let status = resolve(order);
        let presentation = status.presentation();
        Self {
            state: status.state,
            label: status.label,
            timestamp: status.timestamp,
            icon: presentation.icon.to_string(),
            color: presentation.color.to_string(),
        }
    }
}

/// Строка списка заказов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListRow {
    pub id: String,
    pub date: String,
    pub customer_name: Option<String>,
    pub amount: f64,
    pub payment_method: String,
    pub status: OrderStatusView,
    pub shipping_address: String,
    pub timeline: Vec<TimelineEvent>,
}

impl OrderListRow {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            date: order.date.clone(),
            customer_name: order.customer_name().map(str::to_string),
            amount: order.amount(),
            payment_method: order.payment_method_or_default().to_string(),
            status: OrderStatusView::from_order(order),
            shipping_address: order.delivery_details.shipping_address(),
            timeline: timeline(order),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProductRow {
    pub product_id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub line_total: f64,
    pub thumbnail_image: Option<String>,
}

impl OrderedProductRow {
    pub fn from_line(line: &OrderLine) -> Self {
        let product = line.product.as_ref();
        Self {
            product_id: product.map(|p| p.id.clone()).unwrap_or_default(),
            name: product
                .and_then(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown product".to_string()),
            category: line.category().map(str::to_string),
            price: line.unit_price(),
            quantity: line.units(),
            line_total: line.line_total(),
            thumbnail_image: product.and_then(|p| p.thumbnail_image.clone()),
        }
    }
}

/// Products of one order with totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order_id: String,
    pub rows: Vec<OrderedProductRow>,
    pub total_quantity: i64,
    pub total_amount: f64,
}

impl OrderDetail {
    pub fn from_lines(order_id: impl Into<String>, lines: &[OrderLine]) -> Self {
        let rows: Vec<OrderedProductRow> = lines.iter().map(OrderedProductRow::from_line).collect();
        Self {
            order_id: order_id.into(),
            total_quantity: rows.iter().map(|r| r.quantity).fold(0, i64::saturating_add),
            total_amount: rows.iter().map(|r| r.line_total).sum(),
            rows,
        }
    }
}
