//! JSON input parsing
//!
//! Subscription and payment files may be a bare array or an object wrapping
//! the array (`{"subscriptions": [...]}` / `{"payments": [...]}`), matching
//! both the tracker's storage format and its full JSON export.

use std::io::Read;

use serde_json::Value;
use tracing::warn;

use crate::currency::RateTable;
use crate::error::{Error, Result};
use crate::models::{RawPayment, Subscription};

/// Parse subscriptions, skipping entries that are not subscription objects
pub fn parse_subscriptions<R: Read>(reader: R) -> Result<Vec<Subscription>> {
    let items = parse_list(reader, "subscriptions")?;
    let total = items.len();
    let subscriptions: Vec<Subscription> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if subscriptions.len() < total {
        warn!(
            "Skipped {} malformed subscription entries",
            total - subscriptions.len()
        );
    }
    Ok(subscriptions)
}

pub fn parse_raw_payments<R: Read>(reader: R) -> Result<Vec<RawPayment>> {
    let items = parse_list(reader, "payments")?;
    Ok(serde_json::from_value(Value::Array(items))?)
}

/// Parse a rate table: a bare `{code: rate}` map or `{"rates": {...}}`
pub fn parse_rates<R: Read>(reader: R) -> Result<RateTable> {
    let value: Value = serde_json::from_reader(reader)?;
    let value = match value {
        Value::Object(mut map) if matches!(map.get("rates"), Some(Value::Object(_))) => {
            map.remove("rates").unwrap_or_default()
        }
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

fn parse_list<R: Read>(reader: R, key: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(Error::InvalidData(format!("Expected a \"{}\" array", key))),
        },
        _ => Err(Error::InvalidData(format!(
            "Expected an array of {} or an object with a \"{}\" key",
            key, key
        ))),
    }
}
