//! Field keys and field values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Typed identifier for a record field
///
/// Every record type declares an enum of its fields (see [`record_fields!`](crate::record_fields)).
/// Filters and sorts are keyed by that enum, so field names are only ever parsed
/// at the boundary (configuration files, query strings).
pub trait FieldKey: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Canonical snake_case name (e.g. "student_id")
    fn name(self) -> &'static str;

    /// Alternative spellings accepted by [`FieldKey::parse`] (e.g. "studentId")
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Every field of the record, in declaration order
    fn all() -> &'static [Self];

    /// The field a view sorts by before the user picks one
    fn default_sort() -> Self;

    /// Resolve a field from its name or one of its aliases
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all().iter().copied().find(|field| {
            field.name().eq_ignore_ascii_case(name)
                || field
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(name))
        })
    }
}

/// A polymorphic field value read from a record
///
/// Absent data is represented by `None` at the call site
/// (`Record::field_value` returns `Option<FieldValue>`), never by a sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Text(String),
}

impl FieldValue {
    /// Get the value as text if it is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number
    ///
    /// Integers and floats convert directly; text is parsed after trimming
    /// (so a grade stored as "3" still takes part in numeric ranges).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) if f.is_finite() => Some(*f),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Get the value as a timestamp if it is one
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// True for text that is empty after trimming
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    /// Render the value the way it is displayed and searched
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::DateTime(dt) => dt.to_rfc3339(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    crate::record_fields! {
        enum Demo (default = Title) {
            Title => "title",
            ExternalId => "external_id" | "externalId",
        }
    }

    #[test]
    fn test_field_key_parse_name_and_alias() {
        assert_eq!(Demo::parse("title"), Some(Demo::Title));
        assert_eq!(Demo::parse("  TITLE "), Some(Demo::Title));
        assert_eq!(Demo::parse("externalId"), Some(Demo::ExternalId));
        assert_eq!(Demo::parse("external_id"), Some(Demo::ExternalId));
        assert_eq!(Demo::parse("unknown"), None);
        assert_eq!(Demo::default_sort(), Demo::Title);
        assert_eq!(Demo::ExternalId.to_string(), "external_id");
    }

    #[test]
    fn test_field_value_text() {
        let value = FieldValue::from("hello");
        assert_eq!(value.as_text(), Some("hello"));
        assert_eq!(value.as_number(), None);
        assert!(!value.is_blank());
    }

    #[test]
    fn test_field_value_numbers() {
        assert_eq!(FieldValue::from(42u32).as_number(), Some(42.0));
        assert_eq!(FieldValue::from(0.5).as_number(), Some(0.5));
        assert_eq!(FieldValue::from(" 7 ").as_number(), Some(7.0));
        assert_eq!(FieldValue::Float(f64::NAN).as_number(), None);
        assert_eq!(FieldValue::from(true).as_number(), None);
    }

    #[test]
    fn test_field_value_blank() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::from("").is_blank());
        assert!(!FieldValue::from(0i64).is_blank());
    }

    #[test]
    fn test_field_value_render() {
        let dt = Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap();
        assert_eq!(FieldValue::from(dt).render(), "2024-09-01T08:00:00+00:00");
        assert_eq!(FieldValue::from(3i64).render(), "3");
        assert_eq!(FieldValue::from(false).render(), "false");
        assert_eq!(FieldValue::from(dt).as_datetime(), Some(dt));
    }

    #[test]
    fn test_serde_roundtrip_text() {
        let original = FieldValue::from("Grade 3");
        let json = serde_json::to_string(&original).expect("serialize should succeed");
        let restored: FieldValue = serde_json::from_str(&json).expect("deserialize should succeed");
        assert_eq!(original, restored);
    }
}
