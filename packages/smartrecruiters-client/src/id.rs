//! Identifier normalization.
//!
//! The Posting API hands out numeric ids for some records and textual ids
//! for others. Content graphs want ids as strings, so every record id goes
//! through [`normalize_id`] on the way in.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::IdError;

/// Convert a raw JSON identifier into its textual form.
///
/// Integers become their decimal representation, strings pass through
/// unchanged. Anything else is rejected.
pub fn normalize_id(value: &Value) -> Result<String, IdError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Value::Number(_) => Err(IdError::Unsupported { kind: "fractional number" }),
        Value::Null => Err(IdError::Unsupported { kind: "null" }),
        Value::Bool(_) => Err(IdError::Unsupported { kind: "boolean" }),
        Value::Array(_) => Err(IdError::Unsupported { kind: "array" }),
        Value::Object(_) => Err(IdError::Unsupported { kind: "object" }),
    }
}

/// A record identifier, always held in normalized string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        normalize_id(&value)
            .map(RecordId)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_id_becomes_decimal_text() {
        assert_eq!(normalize_id(&json!(42)).unwrap(), "42");
        assert_eq!(normalize_id(&json!(-7)).unwrap(), "-7");
        assert_eq!(
            normalize_id(&json!(18446744073709551615u64)).unwrap(),
            "18446744073709551615"
        );
    }

    #[test]
    fn test_string_id_passes_through() {
        assert_eq!(
            normalize_id(&json!("743999716482941")).unwrap(),
            "743999716482941"
        );
    }

    #[test]
    fn test_non_coercible_ids_are_rejected() {
        assert_eq!(
            normalize_id(&json!(null)),
            Err(IdError::Unsupported { kind: "null" })
        );
        assert!(normalize_id(&json!(1.5)).is_err());
        assert!(normalize_id(&json!(true)).is_err());
        assert!(normalize_id(&json!({"id": 1})).is_err());
    }

    #[test]
    fn test_record_id_deserializes_from_number_or_string() {
        let from_number: RecordId = serde_json::from_value(json!(42)).unwrap();
        let from_string: RecordId = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_value(&from_number).unwrap(), json!("42"));
    }
}
