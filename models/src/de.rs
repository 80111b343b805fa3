//! Lenient deserializers for identifiers the backend sends either as
//! JSON numbers or as numeric strings.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_u64<E: Error>(value: Value) -> Result<u64, E> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| E::custom(format!("identifier out of range: {number}"))),
        Value::String(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|e| E::custom(format!("invalid identifier '{text}': {e}"))),
        other => Err(E::custom(format!("expected identifier, found {other}"))),
    }
}

/// Accepts `123` or `"123"`.
pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_u64(Value::deserialize(deserializer)?)
}

/// Accepts `123`, `"123"` or `null`/absent.
pub fn optional_u64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => value_to_u64(value).map(Some),
    }
}

/// Accepts `123` or `"123"`, keeping the textual form.
pub fn string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}
