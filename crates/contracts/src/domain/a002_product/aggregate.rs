use serde::{Deserialize, Serialize};

use crate::domain::common::loose::{lenient_f64, lenient_i64, lenient_id, lenient_string};

/// Товар каталога
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, alias = "_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, alias = "Name", deserialize_with = "lenient_id")]
    pub name: String,
    #[serde(default, alias = "Category", deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, alias = "Price", deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity_in_stock: Option<i64>,
}

impl Product {
    /// Units on hand, zero when the store did not report a quantity
    pub fn stock(&self) -> i64 {
        self.quantity_in_stock.unwrap_or(0)
    }
}
