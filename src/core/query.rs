//! Query parameters and pagination metadata

use crate::core::FieldKey;
use crate::filter::{FilterState, NumericRange, Selection};
use crate::sort::SortState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for filtering, sorting and pagination
///
/// This structure mirrors the state a list screen keeps in its URL.
/// All parameters have sensible defaults.
///
/// # Example
/// ```text
/// ?page=2&limit=10
/// ?search=amy&sort=name:desc
/// ?filter={"grade": "3", "has_phone": true}
/// ?filter={"age>=": 6, "age<=": 10}&quick=primary,recently-enrolled
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Free-text search term
    pub search: Option<String>,

    /// Field filters as a JSON object
    ///
    /// # Format
    /// - Exact match: `{"field": "value"}` (numbers are matched by their text)
    /// - Required value: `{"field": true}`
    /// - Range: `{"field>=": n, "field<=": n}`
    pub filter: Option<String>,

    /// Comma-separated quick filter ids
    pub quick: Option<String>,

    /// Sort field and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub sort: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: None,
            filter: None,
            quick: None,
            sort: None,
        }
    }
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

/// Largest page size a query may ask for
pub const MAX_LIMIT: usize = 100;

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, ensuring it stays within `1..=MAX_LIMIT`
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Parse filter JSON string into Value
    ///
    /// Malformed JSON is ignored (logged) rather than rejected.
    pub fn filter_value(&self) -> Option<Value> {
        let raw = self.filter.as_ref()?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(filter = %raw, error = %e, "Ignoring malformed filter parameter");
                None
            }
        }
    }

    /// Sort state requested by the query, or the field's default sort
    pub fn sort_state<F: FieldKey>(&self) -> SortState<F> {
        self.sort
            .as_deref()
            .map(SortState::parse)
            .unwrap_or_default()
    }

    /// Filter state requested by the query
    ///
    /// Unknown field names and unsupported values are skipped.
    pub fn filter_state<F: FieldKey>(&self) -> FilterState<F> {
        let mut state = FilterState::new();

        if let Some(search) = &self.search {
            state = state.with_search(search.as_str());
        }

        if let Some(quick) = &self.quick {
            for id in quick.split(',').map(str::trim).filter(|id| !id.is_empty()) {
                state = state.with_quick_filter(id, true);
            }
        }

        let Some(Value::Object(filters)) = self.filter_value() else {
            return state;
        };

        for (key, value) in &filters {
            let (name, bound) = split_bound(key);
            let Some(field) = F::parse(name) else {
                tracing::warn!(field = name, "Ignoring filter on unknown field");
                continue;
            };

            state = match (bound, value) {
                (Some(bound), value) => match value.as_f64() {
                    Some(n) => {
                        let current = state
                            .range(field)
                            .copied()
                            .unwrap_or_else(|| NumericRange::full(f64::NEG_INFINITY, f64::INFINITY));
                        let range = match bound {
                            Bound::Min => current.narrowed(n, current.max()),
                            Bound::Max => current.narrowed(current.min(), n),
                        };
                        state.with_range(field, range)
                    }
                    None => {
                        tracing::warn!(filter = %key, "Ignoring non-numeric range bound");
                        state
                    }
                },
                (None, Value::Bool(required)) => state.with_required(field, *required),
                (None, Value::String(s)) => state.with_selection(field, Selection::parse(s)),
                (None, Value::Number(n)) => state.with_selection(field, Selection::parse(&number_text(n))),
                (None, Value::Null) => state.with_selection(field, Selection::All),
                (None, other) => {
                    tracing::warn!(filter = %key, value = %other, "Ignoring unsupported filter value");
                    state
                }
            };
        }

        state
    }
}

/// Text form of a JSON number as it would appear in a record; `7.0` becomes `7`
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

enum Bound {
    Min,
    Max,
}

fn split_bound(key: &str) -> (&str, Option<Bound>) {
    if let Some(name) = key.strip_suffix(">=") {
        (name, Some(Bound::Min))
    } else if let Some(name) = key.strip_suffix("<=") {
        (name, Some(Bound::Max))
    } else {
        (key, None)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages (at least 1, even when empty)
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    ///
    /// `page` is clamped into `[1, total_pages]`.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit).max(1);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StudentField;
    use crate::sort::SortDirection;

    #[test]
    fn test_query_params_defaults() {
        let params = QueryParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 20);
        assert_eq!(
            params.sort_state::<StudentField>(),
            SortState::ascending(StudentField::Name)
        );
        assert!(params.filter_state::<StudentField>().is_unconstrained());
    }

    #[test]
    fn test_query_params_clamps() {
        let params = QueryParams {
            page: 0,
            limit: 1000,
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_query_params_deserialize_partial() {
        let params: QueryParams =
            serde_json::from_value(serde_json::json!({ "sort": "age:desc", "page": 3 }))
                .expect("query params should deserialize");
        assert_eq!(params.page(), 3);
        assert_eq!(params.limit(), 20);
        let sort = params.sort_state::<StudentField>();
        assert_eq!(sort.field, StudentField::Age);
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_filter_state_from_json() {
        let params = QueryParams {
            search: Some("amy".to_string()),
            filter: Some(
                r#"{"grade": "3", "studentId": 42, "phone": true, "age>=": 6, "age<=": 10, "shoe": "9"}"#
                    .to_string(),
            ),
            quick: Some("primary, recently-enrolled,".to_string()),
            ..Default::default()
        };
        let state = params.filter_state::<StudentField>();

        assert_eq!(state.search(), "amy");
        assert_eq!(
            state.selection(StudentField::Grade),
            &Selection::Value("3".to_string())
        );
        assert_eq!(
            state.selection(StudentField::StudentId),
            &Selection::Value("42".to_string())
        );
        assert!(state.is_required(StudentField::Phone));
        let age = state.range(StudentField::Age).expect("age range");
        assert_eq!((age.min(), age.max()), (6.0, 10.0));
        assert!(!age.is_full());
        assert!(state.has_quick_filter("primary"));
        assert!(state.has_quick_filter("recently-enrolled"));
        assert_eq!(state.quick_filters().count(), 2);
    }

    #[test]
    fn test_integral_float_selection_drops_fraction() {
        let params = QueryParams {
            filter: Some(r#"{"age": 7.0, "attendance_rate": 92.5, "studentId": -3.0}"#.to_string()),
            ..Default::default()
        };
        let state = params.filter_state::<StudentField>();
        assert_eq!(state.selection(StudentField::Age), &Selection::from("7"));
        assert_eq!(state.selection(StudentField::AttendanceRate), &Selection::from("92.5"));
        assert_eq!(state.selection(StudentField::StudentId), &Selection::from("-3"));
    }

    #[test]
    fn test_malformed_filter_is_ignored() {
        let params = QueryParams {
            filter: Some("{not json".to_string()),
            ..Default::default()
        };
        assert!(params.filter_value().is_none());
        assert!(params.filter_state::<StudentField>().is_unconstrained());
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_pagination_meta_empty_has_one_page() {
        let meta = PaginationMeta::new(4, 10, 0);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.page, 1);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }
}
