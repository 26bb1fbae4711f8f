//! Read access to the store API.
//!
//! Services depend on [`OrderSource`] only; the process-wide instance is a
//! [`StoreApiClient`] set up from `[upstream]` at startup.

pub mod client;
pub mod error;

use std::sync::Arc;

use async_trait::async_trait;
use contracts::domain::a001_order::{Order, OrderLine};
use contracts::domain::a002_product::Product;
use once_cell::sync::OnceCell;

pub use client::StoreApiClient;
pub use error::UpstreamError;

use super::config::UpstreamConfig;

static ORDER_SOURCE: OnceCell<Arc<dyn OrderSource>> = OnceCell::new();

/// Источник снимка заказов и товаров
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_orders(&self) -> Result<Vec<Order>, UpstreamError>;

    async fn fetch_products(&self) -> Result<Vec<Product>, UpstreamError>;

    async fn fetch_user_orders(&self, user_id: &str) -> Result<Vec<Order>, UpstreamError>;

    async fn fetch_ordered_products(&self, order_id: &str)
        -> Result<Vec<OrderLine>, UpstreamError>;
}

pub fn initialize(config: &UpstreamConfig) -> anyhow::Result<()> {
    let client = StoreApiClient::new(config)?;
    tracing::info!("Store API client ready: {}", config.base_url);
    ORDER_SOURCE
        .set(Arc::new(client))
        .map_err(|_| anyhow::anyhow!("order source already initialized"))
}

pub fn source() -> Result<Arc<dyn OrderSource>, UpstreamError> {
    ORDER_SOURCE.get().cloned().ok_or(UpstreamError::NotInitialized)
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// In-memory source for service tests
    #[derive(Default)]
    pub struct FakeSource {
        pub orders: Vec<Order>,
        pub products: Vec<Product>,
        pub user_orders: HashMap<String, Vec<Order>>,
        pub ordered_products: HashMap<String, Vec<OrderLine>>,
        pub fail: bool,
    }

    impl FakeSource {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self, url: &str) -> Result<(), UpstreamError> {
            if self.fail {
                return Err(UpstreamError::Status {
                    url: url.to_string(),
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl OrderSource for FakeSource {
        async fn fetch_orders(&self) -> Result<Vec<Order>, UpstreamError> {
            self.check("orders")?;
            Ok(self.orders.clone())
        }

        async fn fetch_products(&self) -> Result<Vec<Product>, UpstreamError> {
            self.check("products")?;
            Ok(self.products.clone())
        }

        async fn fetch_user_orders(&self, user_id: &str) -> Result<Vec<Order>, UpstreamError> {
            self.check("user_orders")?;
            Ok(self.user_orders.get(user_id).cloned().unwrap_or_default())
        }

        async fn fetch_ordered_products(
            &self,
            order_id: &str,
        ) -> Result<Vec<OrderLine>, UpstreamError> {
            self.check("ordered_products")?;
            Ok(self
                .ordered_products
                .get(order_id)
                .cloned()
                .unwrap_or_default())
        }
    }
}
