pub mod aggregate;

pub use aggregate::{DeliveryDetails, Order, OrderLine, ProductRef, DEFAULT_PAYMENT_METHOD};
