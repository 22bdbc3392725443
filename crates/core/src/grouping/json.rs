//! Field access helpers for JSON records.
//!
//! Upstream payloads are lenient: a field may be absent or null, and numeric
//! columns sometimes arrive as strings. Key extraction falls back to the
//! missing sentinel and measure extraction to zero, so one malformed field
//! never poisons a whole report.

use std::str::FromStr;

use cumul_shared::GroupKey;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

/// Extracts a grouping key from a top-level field.
#[must_use]
pub fn key_field(record: &Value, field: &str) -> GroupKey {
    key_at(record, &[field])
}

/// Extracts a grouping key from a nested path.
///
/// Strings are used as-is; numbers and booleans are stringified. Null,
/// absent, and non-scalar values map to [`GroupKey::missing`].
#[must_use]
pub fn key_at<S: AsRef<str>>(record: &Value, path: &[S]) -> GroupKey {
    value_at(record, path).map_or_else(GroupKey::missing, to_key)
}

/// Extracts a measure amount from a top-level field.
#[must_use]
pub fn decimal_field(record: &Value, field: &str) -> Decimal {
    decimal_at(record, &[field])
}

/// Extracts a measure amount from a nested path.
///
/// Integers convert exactly and numeric strings are parsed. Anything else,
/// including an absent field, contributes zero.
#[must_use]
pub fn decimal_at<S: AsRef<str>>(record: &Value, path: &[S]) -> Decimal {
    value_at(record, path).map_or(Decimal::ZERO, to_decimal)
}

fn value_at<'v, S: AsRef<str>>(record: &'v Value, path: &[S]) -> Option<&'v Value> {
    let mut current = record;
    for segment in path {
        current = current.get(segment.as_ref())?;
    }
    Some(current)
}

fn to_key(value: &Value) -> GroupKey {
    match value {
        Value::String(text) => GroupKey::new(text.as_str()),
        Value::Number(number) => GroupKey::new(number.to_string()),
        Value::Bool(flag) => GroupKey::new(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => GroupKey::missing(),
    }
}

fn to_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Decimal::from(integer)
            } else if let Some(integer) = number.as_u64() {
                Decimal::from(integer)
            } else {
                number
                    .as_f64()
                    .and_then(Decimal::from_f64)
                    .unwrap_or(Decimal::ZERO)
            }
        }
        Value::String(text) => Decimal::from_str(text).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}
