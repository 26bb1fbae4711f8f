use async_trait::async_trait;
use contracts::domain::a001_order::{Order, OrderLine};
use contracts::domain::a002_product::Product;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{OrderSource, UpstreamError};
use crate::shared::config::UpstreamConfig;

/// Keys a list may be wrapped under instead of being a bare array
const LIST_KEYS: &[&str] = &["data", "orders", "products", "items"];

/// HTTP-клиент API магазина
pub struct StoreApiClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl StoreApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, url: String) -> Result<Vec<T>, UpstreamError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            tracing::error!("Store API request failed: {} {}", status, url);
            return Err(UpstreamError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let items = decode_list(&body).map_err(|message| UpstreamError::Decode {
            url: url.clone(),
            message,
            preview: preview(&body),
        })?;
        tracing::debug!("{} returned {} records", url, items.len());
        Ok(items)
    }
}

#[async_trait]
impl OrderSource for StoreApiClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>, UpstreamError> {
        self.get_list(self.config.orders_url()).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, UpstreamError> {
        self.get_list(self.config.products_url()).await
    }

    async fn fetch_user_orders(&self, user_id: &str) -> Result<Vec<Order>, UpstreamError> {
        self.get_list(self.config.user_orders_url(user_id)).await
    }

    async fn fetch_ordered_products(
        &self,
        order_id: &str,
    ) -> Result<Vec<OrderLine>, UpstreamError> {
        self.get_list(self.config.ordered_products_url(order_id)).await
    }
}

/// Decode a list payload: a bare array, or an object holding the array under
/// one of [`LIST_KEYS`]. Records that fail to decode are skipped.
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, String> {
    let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;

    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .ok_or_else(|| "expected a list of records".to_string())?,
        Value::Null => Vec::new(),
        other => return Err(format!("expected a list of records, got {}", other)),
    };

    let total = records.len();
    let decoded: Vec<T> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!("Decoded {} of {} records", decoded.len(), total);
    }
    Ok(decoded)
}

fn preview(body: &str) -> String {
    let preview: String = body.chars().take(500).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_array() {
        let orders: Vec<Order> =
            decode_list(r#"[{"_id": "1", "total": 10}, {"_id": "2"}]"#).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "1");
    }

    #[test]
    fn test_decode_wrapped_array() {
        let products: Vec<Product> =
            decode_list(r#"{"success": true, "data": [{"name": "Kurta"}]}"#).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Kurta");
    }

    #[test]
    fn test_decode_skips_malformed_records() {
        let orders: Vec<Order> = decode_list(r#"[{"_id": "1"}, "junk", 42]"#).unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[test]
    fn test_decode_rejects_non_list() {
        assert!(decode_list::<Order>(r#"{"message": "unauthorized"}"#).is_err());
        assert!(decode_list::<Order>("<html>").is_err());
        assert!(decode_list::<Order>("null").unwrap().is_empty());
    }

    #[test]
    fn test_preview_is_truncated() {
        let long = "x".repeat(600);
        assert_eq!(preview(&long).len(), 503);
        assert_eq!(preview("short"), "short");
    }
}
