use serde::{Deserialize, Serialize};

use crate::domain::a001_order::Order;
use crate::domain::common::{is_set, Flag};
use crate::enums::{OrderState, StatePresentation};

/// Canonical status of one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStatus {
    pub state: OrderState,
    pub label: String,
    /// Timestamp companion of the winning flag, as written by the store
    pub timestamp: Option<String>,
}

impl ResolvedStatus {
    pub fn presentation(&self) -> StatePresentation {
        self.state.presentation()
    }
}

/// Flags in precedence order, most final stage first.
///
/// Cancellation sits below the forward-progress stages, so a canceled order
/// that later got a delivery or cash settlement flag reports that stage.
fn precedence(order: &Order) -> [(OrderState, &Option<Flag>, &Option<String>); 4] {
    [
        (OrderState::Completed, &order.cashadmin, &order.cashadmin_date),
        (OrderState::Delivered, &order.status3, &order.delivered_date),
        (OrderState::InTransit, &order.status2, &order.shiped_date),
        (OrderState::Canceled, &order.cancel, &order.canceled_time),
    ]
}

/// Resolve the canonical lifecycle state of an order. Never fails: an order
/// without any recognised flag is `Pending`.
pub fn resolve(order: &Order) -> ResolvedStatus {
    precedence(order)
        .into_iter()
        .find(|(_, flag, _)| is_set(flag))
        .map(|(state, _, timestamp)| ResolvedStatus {
            state,
            label: state.label().to_string(),
            timestamp: timestamp.clone(),
        })
        .unwrap_or_else(|| ResolvedStatus {
            state: OrderState::Pending,
            label: order
                .status
                .as_ref()
                .and_then(Flag::text)
                .unwrap_or(OrderState::Pending.label())
                .to_string(),
            timestamp: None,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineKind {
    Shipped,
    Delivered,
    CashSettled,
    Canceled,
}

impl TimelineKind {
    pub fn label(&self) -> &'static str {
        match self {
            TimelineKind::Shipped => "Shipped",
            TimelineKind::Delivered => "Delivered",
            TimelineKind::CashSettled => "Cash settled",
            TimelineKind::Canceled => "Canceled",
        }
    }
}

/// Событие в истории заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub kind: TimelineKind,
    pub label: String,
    pub at: Option<String>,
}

/// Every lifecycle event recorded on the order, in pipeline order.
///
/// Unlike [`resolve`] this keeps overlapping flags: an order that was shipped
/// and then delivered lists both events. Cancellation is listed only when the
/// `cancel` flag is set.
pub fn timeline(order: &Order) -> Vec<TimelineEvent> {
    let stages = [
        (TimelineKind::Shipped, &order.status2, &order.shiped_date),
        (TimelineKind::Delivered, &order.status3, &order.delivered_date),
        (TimelineKind::CashSettled, &order.cashadmin, &order.cashadmin_date),
    ];

    let mut events: Vec<TimelineEvent> = stages
        .into_iter()
        .filter(|(_, flag, at)| is_set(flag) || at.is_some())
        .map(|(kind, _, at)| TimelineEvent {
            kind,
            label: kind.label().to_string(),
            at: at.clone(),
        })
        .collect();

    if is_set(&order.cancel) {
        events.push(TimelineEvent {
            kind: TimelineKind::Canceled,
            label: TimelineKind::Canceled.label().to_string(),
            at: order.canceled_time.clone(),
        });
    }

    events
}
