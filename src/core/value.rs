use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_millis;

/// One scalar cell of a dataset record.
///
/// Deserialization is untagged: JSON numbers become `Number`, RFC 3339
/// strings become `Date` and every other string stays `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

/// One dataset row: field name to scalar, in declaration order.
pub type Record = IndexMap<String, FieldValue>;

impl FieldValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric key used for ordering and equality across numbers and dates.
    ///
    /// Dates normalize to unix milliseconds; text has no numeric key.
    #[must_use]
    pub fn normalized_key(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Date(value) => Some(datetime_to_unix_millis(*value)),
            Self::Text(_) => None,
        }
    }

    /// Whether this value selects the series called `name`.
    #[must_use]
    pub fn selects(&self, name: &str) -> bool {
        matches!(self, Self::Text(value) if value == name)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{}", value.to_rfc3339()),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::FieldValue;

    #[test]
    fn untagged_json_values_resolve_to_expected_variants() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[3.5, "2024-01-01T00:00:00Z", "revenue"]"#).expect("parse");
        assert_eq!(values[0], FieldValue::Number(3.5));
        assert_eq!(
            values[1],
            FieldValue::Date(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(values[2], FieldValue::Text("revenue".to_owned()));
    }

    #[test]
    fn dates_normalize_to_unix_millis() {
        let date = chrono::Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(FieldValue::Date(date).normalized_key(), Some(1_000.0));
        assert_eq!(FieldValue::from("a").normalized_key(), None);
    }
}
