use crate::error::FetchError;
use crate::models::RestaurantRecord;
use serde_json::Value;
use tracing::warn;

/// Parses a backend body: a JSON array of records, or an object wrapping one
/// under `restaurants`.
///
/// Elements that do not decode as a [`RestaurantRecord`] are skipped and logged.
pub fn decode_records(body: &[u8]) -> Result<Vec<RestaurantRecord>, FetchError> {
    let value: Value = serde_json::from_slice(body)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("restaurants") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(FetchError::UnexpectedShape(
                    "object without a restaurants array".to_string(),
                ))
            }
        },
        other => {
            return Err(FetchError::UnexpectedShape(format!(
                "expected an array, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(decode_values(items))
}

pub fn decode_values(items: Vec<Value>) -> Vec<RestaurantRecord> {
    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RestaurantRecord>(item) {
            Ok(record) => records.push(record),
            Err(error) => warn!(position, %error, "skipping malformed restaurant record"),
        }
    }
    records
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
