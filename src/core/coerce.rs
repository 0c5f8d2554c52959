//! Lenient coercion of loosely-typed input
//!
//! Form posts and spreadsheet exports send booleans as `"1"`, `"True"`,
//! checkbox presence and the like, and leave numeric cells blank. The helpers
//! here turn those into proper Rust values without ever failing on a boolean.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Tokens read as `true`; everything else is `false`
pub const TRUE_TOKENS: [&str; 3] = ["1", "True", "true"];

/// Coerce a raw token to a boolean
///
/// Surrounding whitespace is ignored. Never fails.
pub fn coerce_bool(token: &str) -> bool {
    TRUE_TOKENS.contains(&token.trim())
}

/// Coerce an arbitrary JSON value to a boolean
///
/// Booleans pass through, numbers are true when non-zero, strings go through
/// [`coerce_bool`], anything else is false.
pub fn coerce_bool_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => coerce_bool(s),
        _ => false,
    }
}

/// Parse a blank-or-number cell: blank means absent
pub fn parse_optional_f64(raw: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}

/// Parse a blank-or-integer cell: blank means absent
///
/// Whole-valued decimals such as `"15.0"` are accepted.
pub fn parse_optional_i64(raw: &str) -> Result<Option<i64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Some(i));
    }
    match raw.parse::<f64>() {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        Ok(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        Ok(f) if f.fract() == 0.0 => Err(format!("'{}' is out of range", raw)),
        _ => Err(format!("'{}' is not an integer", raw)),
    }
}

/// serde helper: boolean from bool, number, string or null
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_bool_value(&value))
}

/// serde helper: optional float from number, numeric string, `""` or null
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => parse_optional_f64(&s).map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "expected a number, got {}",
            other
        ))),
    }
}

/// serde helper: optional integer from number, numeric string, `""` or null
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => parse_optional_i64(&n.to_string()).map_err(serde::de::Error::custom),
        },
        Value::String(s) => parse_optional_i64(&s).map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "expected an integer, got {}",
            other
        ))),
    }
}

/// serde helper: optional text where `""` means absent
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
