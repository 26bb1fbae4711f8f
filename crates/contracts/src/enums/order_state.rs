use serde::{Deserialize, Serialize};

/// Каноническое состояние заказа
///
/// Variant order follows the pipeline; it is also the order of keys in
/// per-state maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderState {
    Pending,
    InTransit,
    Delivered,
    Completed,
    Canceled,
}

/// Icon and color key used by the order views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatePresentation {
    pub icon: &'static str,
    pub color: &'static str,
}

impl OrderState {
    pub fn label(&self) -> &'static str {
        match self {
            OrderState::Pending => "Pending",
            OrderState::InTransit => "In Transit",
            OrderState::Delivered => "Delivered",
            OrderState::Completed => "Completed",
            OrderState::Canceled => "Canceled",
        }
    }

    pub fn presentation(&self) -> StatePresentation {
        let (icon, color) = match self {
            OrderState::Pending => ("alert-circle", "gray"),
            OrderState::InTransit => ("truck", "yellow"),
            OrderState::Delivered => ("package", "blue"),
            OrderState::Completed => ("check-circle", "green"),
            OrderState::Canceled => ("ban", "red"),
        };
        StatePresentation { icon, color }
    }

    /// Revenue of orders in this state is counted as delivered revenue
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, OrderState::Delivered | OrderState::Completed)
    }

    pub fn all() -> Vec<OrderState> {
        vec![
            OrderState::Pending,
            OrderState::InTransit,
            OrderState::Delivered,
            OrderState::Completed,
            OrderState::Canceled,
        ]
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_delivered_and_completed_are_fulfilled() {
        let fulfilled: Vec<_> = OrderState::all()
            .into_iter()
            .filter(OrderState::is_fulfilled)
            .collect();
        assert_eq!(fulfilled, vec![OrderState::Delivered, OrderState::Completed]);
    }
}
