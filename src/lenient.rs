//! Tolerant field deserializers for loosely shaped webhook records.
//!
//! Provider payloads are not always well typed: a name may arrive as a number,
//! a length as a string. These helpers accept any JSON value and degrade to
//! "absent" instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, scalars are stringified, anything else is absent.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Non-negative integer from a number or numeric string, `0` otherwise.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn length<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| v as u64)
            })
            .unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

/// Deserialize a record from a JSON object, or fall back to its default.
///
/// Non-object values (strings, arrays, null) are never coerced positionally.
pub fn record<T>(value: &Value) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !value.is_object() {
        tracing::debug!("Expected a record object, got {value}");
        return T::default();
    }
    T::deserialize(value).unwrap_or_else(|e| {
        tracing::debug!("Malformed record {value}: {e}");
        T::default()
    })
}
