//! Tolerant decoders for the store API payloads.
//!
//! The upstream store writes documents without a schema: flags flip between
//! booleans and free text, amounts arrive as numbers or strings, nested
//! objects are sometimes `null`. Nothing here fails on a bad value; the field
//! simply decodes as absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw lifecycle flag (`status2`, `cancel`, `cashadmin`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(Value),
}

impl Flag {
    /// JavaScript-style truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n != 0.0 && !n.is_nan(),
            Flag::Text(s) => !s.trim().is_empty(),
            Flag::Other(v) => !v.is_null(),
        }
    }

    /// Free-text value of the flag, if it carries one
    pub fn text(&self) -> Option<&str> {
        match self {
            Flag::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }
}

/// `true` when the flag is present and truthy
pub fn is_set(flag: &Option<Flag>) -> bool {
    flag.as_ref().map_or(false, Flag::is_truthy)
}

/// Number or numeric string (`"1,299"`, `"₹450"`); anything else is `None`
pub fn number_from_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches('₹')
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        // MongoDB extended JSON: {"$oid": "..."}
        Value::Object(map) => map.get("$oid").and_then(text_from_value),
        _ => None,
    }
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        other => number_from_value(other).map(|f| f.trunc() as i64),
    }))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value))
}

/// Same as [`lenient_string`] but for required fields, empty when absent
pub fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// `null` or a malformed value decodes as `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}
