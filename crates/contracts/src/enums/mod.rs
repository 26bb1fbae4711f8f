pub mod order_state;
pub mod stock_level;

pub use order_state::{OrderState, StatePresentation};
pub use stock_level::StockLevel;
