//! Record trait defining the rows a roster view operates on

use crate::core::field::{FieldKey, FieldValue};
use uuid::Uuid;

/// Base trait for every record listed by a roster view (students, teachers, ...).
///
/// A record exposes:
/// - id: Unique identifier within a snapshot
/// - Field: The enum of its fields, used for typed dispatch
/// - field_value: Read access to a single field
///
/// The pipeline never mutates records; it only reorders, filters and slices
/// references to them.
pub trait Record: Clone + Send + Sync + 'static {
    /// The field enum of this record type
    type Field: FieldKey;

    /// The plural resource name (e.g., "students", "teachers")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the value of a single field, `None` when the record has no data for it
    fn field_value(&self, field: Self::Field) -> Option<FieldValue>;

    /// Fields matched by the free-text search when a view does not override them
    fn searchable_fields() -> &'static [Self::Field];

    /// Get the value of a field only when it carries data
    ///
    /// Blank text counts as absent.
    fn present_value(&self, field: Self::Field) -> Option<FieldValue> {
        self.field_value(field).filter(|value| !value.is_blank())
    }
}
