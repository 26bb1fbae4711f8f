pub mod d400_order_summary;
pub mod d401_order_history;
