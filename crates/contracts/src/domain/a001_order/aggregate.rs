use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::common::loose::{
    lenient_f64, lenient_i64, lenient_id, lenient_string, null_as_default,
};
use crate::domain::common::Flag;

/// Payment method shown when the order does not carry one
pub const DEFAULT_PAYMENT_METHOD: &str = "COD";

/// Адрес и контакты доставки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// The store also writes this field as `pinncode`
    #[serde(
        default,
        alias = "pinncode",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pincode: Option<String>,
    /// Address kind ("Home", "Work", ...)
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub address_type: Option<String>,
}

impl DeliveryDetails {
    /// Single-line shipping address, empty parts skipped
    pub fn shipping_address(&self) -> String {
        [
            &self.address_type,
            &self.address,
            &self.city,
            &self.state,
            &self.pincode,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Product as embedded into an order document
///
/// The store writes these keys capitalised (`Name`, `Category`, `Price`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    #[serde(default, alias = "_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, alias = "Name", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, alias = "Category", deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, alias = "Price", deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail_image: Option<String>,
}

/// A populated product object, or a bare id when the store did not populate it
fn lenient_product<'de, D>(deserializer: D) -> Result<Option<ProductRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => serde_json::from_value(Value::Object(map)).ok(),
        Some(Value::String(id)) if !id.trim().is_empty() => Some(ProductRef {
            id: id.trim().to_string(),
            ..ProductRef::default()
        }),
        _ => None,
    })
}

/// Строка заказа: товар и количество
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default, deserialize_with = "lenient_product")]
    pub product: Option<ProductRef>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: Option<i64>,
}

impl OrderLine {
    /// Units on the line; a referenced product without a quantity counts once
    pub fn units(&self) -> i64 {
        match (self.quantity, &self.product) {
            (Some(q), _) => q.max(0),
            (None, Some(_)) => 1,
            (None, None) => 0,
        }
    }

    pub fn unit_price(&self) -> f64 {
        self.product.as_ref().and_then(|p| p.price).unwrap_or(0.0)
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price() * self.units() as f64
    }

    pub fn category(&self) -> Option<&str> {
        self.product.as_ref().and_then(|p| p.category.as_deref())
    }
}

/// Заказ в том виде, в каком его отдаёт API магазина
///
/// Lifecycle flags are independent and may overlap (a delivered order can
/// still carry `status2`). Use `shared::order_lifecycle::resolve` to get the
/// canonical state instead of reading flags directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Raw order date, e.g. `"12/5/2024 at 10:30:15 AM"`
    #[serde(default, deserialize_with = "lenient_id")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delivery_details: DeliveryDetails,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    // Single-product order
    #[serde(default, deserialize_with = "lenient_product", skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
    #[serde(default, deserialize_with = "lenient_i64", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    // Multi-product order
    #[serde(
        default,
        alias = "products",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<OrderLine>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    // Lifecycle flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status2: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status3: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashadmin: Option<Flag>,

    // Timestamp companions of the flags
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub shiped_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub delivered_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub cashadmin_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub canceled_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Order {
    /// Order amount: `total`, else the embedded product price, else the sum of
    /// the lines. Zero when none of them is present.
    pub fn amount(&self) -> f64 {
        if let Some(total) = self.total {
            return total;
        }
        if let Some(price) = self.product.as_ref().and_then(|p| p.price) {
            return price;
        }
        self.items.iter().map(OrderLine::line_total).sum()
    }

    /// Number of product units in the order
    pub fn ordered_units(&self) -> i64 {
        if !self.items.is_empty() {
            return self
                .items
                .iter()
                .map(OrderLine::units)
                .fold(0, i64::saturating_add);
        }
        match (self.quantity, &self.product) {
            (Some(q), _) => q.max(0),
            (None, Some(_)) => 1,
            (None, None) => 0,
        }
    }

    /// Category the order is counted under: the order's own category, else
    /// the single product's, else the first line that has one
    pub fn primary_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .or_else(|| self.product.as_ref().and_then(|p| p.category.as_deref()))
            .or_else(|| self.items.iter().find_map(OrderLine::category))
    }

    pub fn payment_method_or_default(&self) -> &str {
        self.payment_method
            .as_deref()
            .unwrap_or(DEFAULT_PAYMENT_METHOD)
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.delivery_details.name.as_deref()
    }

    /// Lines of the order; a single-product order is exposed as one line
    pub fn lines(&self) -> Vec<OrderLine> {
        if !self.items.is_empty() {
            return self.items.clone();
        }
        match &self.product {
            Some(product) => vec![OrderLine {
                product: Some(product.clone()),
                quantity: self.quantity,
            }],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(value: Value) -> Order {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decodes_store_document() {
        let o = order(json!({
            "_id": "65a1",
            "date": "12/5/2024 at 10:30:15 AM",
            "deliveryDetails": {
                "name": "Asha",
                "mobile": 9876543210u64,
                "address": "12 MG Road",
                "city": "Kochi",
                "state": "Kerala",
                "pinncode": 682001,
                "type": "Home"
            },
            "product": {"_id": "p1", "Name": "Kurta", "Category": "Clothing", "Price": "799"},
            "quantity": 2,
            "status": "Order placed",
            "status2": "Shipped",
            "cancel": false,
            "shipedDate": "12/6/2024"
        }));

        assert_eq!(o.id, "65a1");
        assert_eq!(o.delivery_details.pincode.as_deref(), Some("682001"));
        assert_eq!(o.delivery_details.mobile.as_deref(), Some("9876543210"));
        let product = o.product.as_ref().unwrap();
        assert_eq!(product.name.as_deref(), Some("Kurta"));
        assert_eq!(product.price, Some(799.0));
        assert_eq!(o.status2, Some(Flag::Text("Shipped".into())));
        assert_eq!(o.shiped_date.as_deref(), Some("12/6/2024"));
    }

    #[test]
    fn test_amount_fallbacks() {
        assert_eq!(order(json!({"total": 1200, "product": {"Price": 10}})).amount(), 1200.0);
        assert_eq!(order(json!({"product": {"Price": 450}})).amount(), 450.0);
        let multi = order(json!({
            "products": [
                {"product": {"Price": 100}, "quantity": 2},
                {"product": {"Price": 50}, "quantity": 1}
            ]
        }));
        assert_eq!(multi.amount(), 250.0);
        assert_eq!(order(json!({})).amount(), 0.0);
    }

    #[test]
    fn test_units_and_category() {
        let single = order(json!({"product": {"Category": "Watches"}}));
        assert_eq!(single.ordered_units(), 1);
        assert_eq!(single.primary_category(), Some("Watches"));

        let multi = order(json!({
            "items": [
                {"product": "bare-id", "quantity": 3},
                {"product": {"Category": "Books"}, "quantity": "2"}
            ]
        }));
        assert_eq!(multi.ordered_units(), 5);
        assert_eq!(multi.primary_category(), Some("Books"));

        let direct = order(json!({"category": "Mobiles", "product": {"Category": "Books"}}));
        assert_eq!(direct.primary_category(), Some("Mobiles"));
    }

    #[test]
    fn test_payment_method_and_address() {
        let o = order(json!({
            "deliveryDetails": {"address": "12 MG Road", "city": "Kochi", "state": ""}
        }));
        assert_eq!(o.payment_method_or_default(), "COD");
        assert_eq!(o.delivery_details.shipping_address(), "12 MG Road, Kochi");

        let paid = order(json!({"paymentMethod": "UPI", "deliveryDetails": null}));
        assert_eq!(paid.payment_method_or_default(), "UPI");
        assert_eq!(paid.delivery_details, DeliveryDetails::default());
    }

    #[test]
    fn test_single_product_exposed_as_line() {
        let o = order(json!({"product": {"Name": "Pen", "Price": 20}, "quantity": 3}));
        let lines = o.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_total(), 60.0);
        assert!(order(json!({})).lines().is_empty());
    }

    #[test]
    fn test_ordered_units_saturate() {
        let o = order(json!({
            "items": [
                {"product": "a", "quantity": i64::MAX},
                {"product": "b", "quantity": 2}
            ]
        }));
        assert_eq!(o.ordered_units(), i64::MAX);
    }
}
