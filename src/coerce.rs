// Numeric Coercion
// Digit-only text becomes an integer; everything else stays text

use serde::{Deserialize, Serialize};
use std::fmt;

/// FieldValue - A record field: either text or an integer
///
/// Serialized untagged, so JSON sees `"abc"` or `123`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(value)
    }
}

/// True when `text` is non-empty and made only of ASCII decimal digits
pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Coerce already-normalized text.
///
/// Leading zeros are lost on purpose: `"045"` becomes `45`.
/// A digit run too long for `u64` stays text.
pub fn coerce(text: &str) -> FieldValue {
    if !is_all_digits(text) {
        return FieldValue::Text(text.to_string());
    }

    match text.parse::<u64>() {
        Ok(value) => FieldValue::Integer(value),
        Err(_) => FieldValue::Text(text.to_string()),
    }
}
