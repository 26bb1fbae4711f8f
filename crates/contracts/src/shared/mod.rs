pub mod order_lifecycle;
