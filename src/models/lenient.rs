//! Serde adapters for request fields that may arrive as JSON numbers or as
//! human-formatted strings (`"1,200.50"`).
//!
//! Anything that cannot be read as a number becomes `None`, never zero.

use crate::core::numeric::parse_numeric;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn resolve(raw: Option<RawNumber>) -> Option<f64> {
    match raw? {
        RawNumber::Number(value) => Some(value).filter(|v| v.is_finite()),
        RawNumber::Text(text) => {
            let parsed = parse_numeric(&text);
            if parsed.is_none() && !text.trim().is_empty() {
                tracing::warn!(input = %text, "Ignoring malformed numeric input");
            }
            parsed
        }
    }
}

/// Optional float, accepting numbers or numeric strings
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(resolve(raw))
}

/// Optional integer, accepting numbers or numeric strings without a
/// fractional part
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(resolve(raw).and_then(|value| {
        if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
            Some(value as i64)
        } else {
            tracing::warn!(input = value, "Ignoring non-integer identifier");
            None
        }
    }))
}

/// Optional string, with blank input treated as absent
pub fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
