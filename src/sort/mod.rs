//! Sort state and record comparison
//!
//! Records without a value for the sort field always come last, whatever the
//! direction. Equal keys compare as `Equal`, and sorting uses the stable
//! `slice::sort_by`, so ties keep their snapshot order.

pub mod collation;

pub use collation::{CollationKey, compare_text};

use crate::core::{FieldKey, FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// Parse "asc"/"ascending"/"desc"/"descending" (case-insensitive)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Field and direction a view is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: FieldKey> Default for SortState<F> {
    fn default() -> Self {
        Self::ascending(F::default_sort())
    }
}

impl<F: FieldKey> SortState<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: F) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: F) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Column-header click: same field flips direction, another field starts ascending
    pub fn toggled(self, field: F) -> Self {
        if self.field == field {
            Self::new(field, self.direction.reversed())
        } else {
            Self::ascending(field)
        }
    }

    /// Parse a `field[:direction]` expression (e.g. "name:desc", "studentId")
    ///
    /// An unknown field falls back to the default sort field and an unknown
    /// direction to ascending; both are logged.
    pub fn parse(expr: &str) -> Self {
        let (field_name, direction) = match expr.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (expr, None),
        };

        let field = F::parse(field_name).unwrap_or_else(|| {
            tracing::warn!(
                sort_field = field_name,
                fallback = F::default_sort().name(),
                "Unknown sort field, using default"
            );
            F::default_sort()
        });

        let direction = match direction {
            None => SortDirection::Ascending,
            Some(raw) => SortDirection::parse(raw).unwrap_or_else(|| {
                tracing::warn!(sort_direction = raw, "Unknown sort direction, using ascending");
                SortDirection::Ascending
            }),
        };

        Self::new(field, direction)
    }

    /// Render back to a `field:direction` expression
    pub fn to_expr(&self) -> String {
        format!("{}:{}", self.field.name(), self.direction.as_str())
    }
}

/// Comparable form of a present field value
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    DateTime(DateTime<Utc>),
    Boolean(bool),
    Text(CollationKey),
}

impl SortKey {
    /// Build the key for a value; blank text and non-finite numbers have no key
    pub fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(i) => Some(SortKey::Number(*i as f64)),
            FieldValue::Float(f) if f.is_finite() => Some(SortKey::Number(*f)),
            FieldValue::Float(_) => None,
            FieldValue::Boolean(b) => Some(SortKey::Boolean(*b)),
            FieldValue::DateTime(dt) => Some(SortKey::DateTime(*dt)),
            FieldValue::Text(s) if s.trim().is_empty() => None,
            FieldValue::Text(s) => Some(SortKey::Text(CollationKey::new(s))),
        }
    }

    /// Extract the key of `field` from a record
    pub fn of<R: Record>(record: &R, field: R::Field) -> Option<Self> {
        record
            .field_value(field)
            .as_ref()
            .and_then(SortKey::from_value)
    }

    fn kind_rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::DateTime(_) => 1,
            SortKey::Boolean(_) => 2,
            SortKey::Text(_) => 3,
        }
    }

    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::DateTime(a), SortKey::DateTime(b)) => a.cmp(b),
            (SortKey::Boolean(a), SortKey::Boolean(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// Compare two optional keys
///
/// Missing keys sort after present ones in both directions.
pub fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.apply(a.cmp_present(b)),
    }
}

/// Compare two records under a sort state
pub fn compare_records<R: Record>(a: &R, b: &R, sort: &SortState<R::Field>) -> Ordering {
    compare_keys(
        SortKey::of(a, sort.field).as_ref(),
        SortKey::of(b, sort.field).as_ref(),
        sort.direction,
    )
}

/// Stable-sort `indices` into `records` under a sort state
///
/// Keys are extracted once per record rather than once per comparison.
pub fn sort_indices<R: Record>(records: &[R], indices: &mut Vec<usize>, sort: &SortState<R::Field>) {
    let mut keyed: Vec<(usize, Option<SortKey>)> = indices
        .iter()
        .map(|&index| (index, SortKey::of(&records[index], sort.field)))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| compare_keys(a.as_ref(), b.as_ref(), sort.direction));

    indices.clear();
    indices.extend(keyed.into_iter().map(|(index, _)| index));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Student, StudentField};

    fn names(records: &[Student], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| records[i].name.clone()).collect()
    }

    fn sorted_names(records: &[Student], sort: SortState<StudentField>) -> Vec<String> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        sort_indices(records, &mut indices, &sort);
        names(records, &indices)
    }

    #[test]
    fn test_non_finite_numbers_sort_with_missing_values() {
        let records = vec![
            Student::new("S1", "NaN").with_attendance_rate(f64::NAN),
            Student::new("S2", "Half").with_attendance_rate(50.0),
            Student::new("S3", "Blank"),
            Student::new("S4", "Infinite").with_attendance_rate(f64::INFINITY),
            Student::new("S5", "Low").with_attendance_rate(10.0),
        ];

        assert_eq!(
            sorted_names(&records, SortState::ascending(StudentField::AttendanceRate)),
            vec!["Low", "Half", "NaN", "Blank", "Infinite"]
        );
        assert_eq!(
            sorted_names(&records, SortState::descending(StudentField::AttendanceRate)),
            vec!["Half", "Low", "NaN", "Blank", "Infinite"]
        );
        assert_eq!(SortKey::from_value(&FieldValue::Float(f64::NAN)), None);
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Descending));
        assert_eq!(SortDirection::parse("ascending"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("sideways"), None);
    }

    #[test]
    fn test_sort_state_parse_with_fallbacks() {
        let sort = SortState::<StudentField>::parse("studentId:desc");
        assert_eq!(sort, SortState::descending(StudentField::StudentId));

        let sort = SortState::<StudentField>::parse("age");
        assert_eq!(sort, SortState::ascending(StudentField::Age));

        let sort = SortState::<StudentField>::parse("shoe_size:desc");
        assert_eq!(sort, SortState::descending(StudentField::Name));

        let sort = SortState::<StudentField>::parse("grade:upwards");
        assert_eq!(sort, SortState::ascending(StudentField::Grade));
        assert_eq!(sort.to_expr(), "grade:asc");
    }

    #[test]
    fn test_toggled() {
        let sort = SortState::<StudentField>::default();
        assert_eq!(sort, SortState::ascending(StudentField::Name));
        assert_eq!(sort.toggled(StudentField::Name), SortState::descending(StudentField::Name));
        assert_eq!(
            SortState::descending(StudentField::Name).toggled(StudentField::Age),
            SortState::ascending(StudentField::Age)
        );
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let records = vec![
            Student::new("S1", "NoAge"),
            Student::new("S2", "Ten").with_age(10),
            Student::new("S3", "Six").with_age(6),
        ];

        assert_eq!(
            sorted_names(&records, SortState::ascending(StudentField::Age)),
            vec!["Six", "Ten", "NoAge"]
        );
        assert_eq!(
            sorted_names(&records, SortState::descending(StudentField::Age)),
            vec!["Ten", "Six", "NoAge"]
        );
    }

    #[test]
    fn test_blank_text_sorts_as_missing() {
        let records = vec![
            Student::new("S1", "Amy").with_grade(" "),
            Student::new("S2", "Ben").with_grade("4"),
        ];
        assert_eq!(
            sorted_names(&records, SortState::descending(StudentField::Grade)),
            vec!["Ben", "Amy"]
        );
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        let records = vec![
            Student::new("S1", "Cid").with_grade("3"),
            Student::new("S2", "Amy").with_grade("3"),
            Student::new("S3", "Ben").with_grade("1"),
        ];
        assert_eq!(
            sorted_names(&records, SortState::ascending(StudentField::Grade)),
            vec!["Ben", "Cid", "Amy"]
        );
        assert_eq!(
            sorted_names(&records, SortState::descending(StudentField::Grade)),
            vec!["Cid", "Amy", "Ben"]
        );
    }

    #[test]
    fn test_numeric_comparison_is_not_lexical() {
        let records = vec![
            Student::new("S1", "Hundred").with_attendance_rate(100.0),
            Student::new("S2", "Nine").with_attendance_rate(9.5),
        ];
        assert_eq!(
            sorted_names(&records, SortState::ascending(StudentField::AttendanceRate)),
            vec!["Nine", "Hundred"]
        );
    }

    #[test]
    fn test_compare_records_matches_sort_indices() {
        let a = Student::new("S1", "émile");
        let b = Student::new("S2", "Fay");
        let sort = SortState::ascending(StudentField::Name);
        assert_eq!(compare_records(&a, &b, &sort), Ordering::Less);
        assert_eq!(compare_records(&b, &a, &sort), Ordering::Greater);
    }

    #[test]
    fn test_mixed_kinds_order_by_kind() {
        let number = SortKey::Number(1.0);
        let text = SortKey::from_value(&FieldValue::from("a")).expect("text key");
        assert_eq!(
            compare_keys(Some(&number), Some(&text), SortDirection::Ascending),
            Ordering::Less
        );
    }
}
