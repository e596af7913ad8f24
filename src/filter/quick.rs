//! Quick filters: named, pre-built predicates toggled as tags
//!
//! A quick filter passes when ANY of its conditions passes; a record must
//! pass ALL active quick filters.

use crate::core::{FieldKey, Record};
use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;

/// A single condition inside a quick filter
#[derive(Debug, Clone, PartialEq)]
pub enum Condition<F> {
    /// Rendered value, trimmed, equals one of the listed values (ASCII case-insensitive)
    Equals { field: F, values: Vec<String> },

    /// Field carries a non-blank value
    Present(F),

    /// Field is absent or blank
    Missing(F),

    /// Numeric value within the optional bounds (inclusive)
    Range {
        field: F,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// Timestamp no older than `days` before the catalog's reference time
    WithinDays { field: F, days: i64 },
}

impl<F: FieldKey> Condition<F> {
    pub fn equals<I, S>(field: F, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::Equals {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn field(&self) -> F {
        match self {
            Condition::Equals { field, .. }
            | Condition::Range { field, .. }
            | Condition::WithinDays { field, .. } => *field,
            Condition::Present(field) | Condition::Missing(field) => *field,
        }
    }

    pub fn matches<R>(&self, record: &R, reference_time: DateTime<Utc>) -> bool
    where
        R: Record<Field = F>,
    {
        match self {
            Condition::Equals { field, values } => {
                record.present_value(*field).is_some_and(|value| {
                    let rendered = value.render();
                    let rendered = rendered.trim();
                    values
                        .iter()
                        .any(|candidate| candidate.trim().eq_ignore_ascii_case(rendered))
                })
            }
            Condition::Present(field) => record.present_value(*field).is_some(),
            Condition::Missing(field) => record.present_value(*field).is_none(),
            Condition::Range { field, min, max } => record
                .present_value(*field)
                .and_then(|value| value.as_number())
                .is_some_and(|n| min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi)),
            Condition::WithinDays { field, days } => {
                let since = earliest_within(reference_time, *days);
                record
                    .present_value(*field)
                    .and_then(|value| value.as_datetime())
                    .is_some_and(|dt| since.is_none_or(|since| dt >= since))
            }
        }
    }
}

/// Lower bound of a `within_days` window
///
/// `None` when the bound falls outside the representable time range, in
/// which case every timestamp is inside the window.
pub(crate) fn earliest_within(reference_time: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(days).and_then(|delta| reference_time.checked_sub_signed(delta))
}

/// A named quick filter
#[derive(Debug, Clone, PartialEq)]
pub struct QuickFilter<F> {
    id: String,
    label: String,
    any_of: Vec<Condition<F>>,
}

impl<F: FieldKey> QuickFilter<F> {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            any_of: Vec::new(),
        }
    }

    /// Add an alternative condition
    pub fn or(mut self, condition: Condition<F>) -> Self {
        self.any_of.push(condition);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn conditions(&self) -> &[Condition<F>] {
        &self.any_of
    }

    /// A quick filter without conditions matches nothing
    pub fn matches<R>(&self, record: &R, reference_time: DateTime<Utc>) -> bool
    where
        R: Record<Field = F>,
    {
        self.any_of
            .iter()
            .any(|condition| condition.matches(record, reference_time))
    }
}

/// The quick filters available to a view, keyed by id
///
/// Time-relative conditions are evaluated against `reference_time`, fixed
/// when the catalog is built so the pipeline stays a pure function.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickFilterCatalog<F> {
    filters: IndexMap<String, QuickFilter<F>>,
    reference_time: DateTime<Utc>,
}

impl<F: FieldKey> QuickFilterCatalog<F> {
    pub fn new(reference_time: DateTime<Utc>) -> Self {
        Self {
            filters: IndexMap::new(),
            reference_time,
        }
    }

    /// Add a quick filter, replacing any previous filter with the same id
    pub fn with(mut self, filter: QuickFilter<F>) -> Self {
        self.insert(filter);
        self
    }

    pub fn insert(&mut self, filter: QuickFilter<F>) -> Option<QuickFilter<F>> {
        self.filters.insert(filter.id.clone(), filter)
    }

    pub fn get(&self, id: &str) -> Option<&QuickFilter<F>> {
        self.filters.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuickFilter<F>> {
        self.filters.values()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }
}

impl<F: FieldKey> Default for QuickFilterCatalog<F> {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Student, StudentField};
    use chrono::Duration;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap()
    }

    fn primary() -> QuickFilter<StudentField> {
        QuickFilter::new("primary", "Primary grades")
            .or(Condition::equals(StudentField::Grade, ["1", "2", "3"]))
            .or(Condition::equals(
                StudentField::Grade,
                ["Grade 1", "Grade 2", "Grade 3"],
            ))
    }

    #[test]
    fn test_equals_matches_any_label() {
        let filter = primary();
        let now = reference();
        assert!(filter.matches(&Student::new("S1", "Amy").with_grade("3"), now));
        assert!(filter.matches(&Student::new("S2", "Ben").with_grade(" grade 2 "), now));
        assert!(!filter.matches(&Student::new("S3", "Cid").with_grade("7"), now));
        assert!(!filter.matches(&Student::new("S4", "Dee"), now));
    }

    #[test]
    fn test_within_days() {
        let now = reference();
        let condition = Condition::WithinDays {
            field: StudentField::EnrolledAt,
            days: 30,
        };
        let recent = Student::new("S1", "Amy").with_enrolled_at(now - Duration::days(10));
        let old = Student::new("S2", "Ben").with_enrolled_at(now - Duration::days(45));
        let unknown = Student::new("S3", "Cid");

        assert!(condition.matches(&recent, now));
        assert!(!condition.matches(&old, now));
        assert!(!condition.matches(&unknown, now));
    }

    #[test]
    fn test_within_days_beyond_time_range_matches_every_timestamp() {
        let now = reference();
        let student = Student::new("S1", "Amy").with_enrolled_at(now - Duration::days(3650));

        for days in [100_000_000, i64::MAX] {
            let condition = Condition::WithinDays {
                field: StudentField::EnrolledAt,
                days,
            };
            assert!(condition.matches(&student, now), "days = {days}");
            assert!(!condition.matches(&Student::new("S2", "Ben"), now));
        }
    }

    #[test]
    fn test_range_condition_with_open_bound() {
        let now = reference();
        let low_attendance = Condition::Range {
            field: StudentField::AttendanceRate,
            min: None,
            max: Some(75.0),
        };
        assert!(low_attendance.matches(&Student::new("S1", "Amy").with_attendance_rate(60.0), now));
        assert!(low_attendance.matches(&Student::new("S1", "Amy").with_attendance_rate(75.0), now));
        assert!(!low_attendance.matches(&Student::new("S2", "Ben").with_attendance_rate(90.0), now));
        assert!(!low_attendance.matches(&Student::new("S3", "Cid"), now));
    }

    #[test]
    fn test_present_and_missing() {
        let now = reference();
        let with_phone = Student::new("S1", "Amy").with_phone("555-0101");
        let blank_phone = Student::new("S2", "Ben").with_phone(" ");

        assert!(Condition::Present(StudentField::Phone).matches(&with_phone, now));
        assert!(!Condition::Present(StudentField::Phone).matches(&blank_phone, now));
        assert!(Condition::Missing(StudentField::Phone).matches(&blank_phone, now));
    }

    #[test]
    fn test_empty_quick_filter_matches_nothing() {
        let filter = QuickFilter::<StudentField>::new("empty", "Empty");
        assert!(!filter.matches(&Student::new("S1", "Amy"), reference()));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = QuickFilterCatalog::new(reference()).with(primary());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("primary"));
        assert_eq!(catalog.get("primary").map(QuickFilter::label), Some("Primary grades"));
        assert!(catalog.get("secondary").is_none());
    }
}
