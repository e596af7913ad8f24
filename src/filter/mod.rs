//! Filter state and the predicates evaluated against it
//!
//! A [`FilterState`] is an immutable value: every builder method consumes the
//! state and returns a new one, so views detect changes with a plain `!=`.

pub mod predicates;
pub mod quick;

pub use predicates::PredicateSet;
pub use quick::{Condition, QuickFilter, QuickFilterCatalog};

use crate::core::FieldKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sentinel accepted in place of an exact-match value meaning "no constraint"
pub const ALL_SENTINEL: &str = "all";

/// Exact-match selection for a single field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// No constraint
    #[default]
    All,
    /// The field must equal this value exactly (case-sensitive)
    Value(String),
}

impl Selection {
    /// Build a selection from a raw UI value
    ///
    /// Empty strings and the `"all"` sentinel map to [`Selection::All`].
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() || raw == ALL_SENTINEL {
            Selection::All
        } else {
            Selection::Value(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(v) => v.trim().is_empty() || v == ALL_SENTINEL,
        }
    }

    /// The selected value, if this selection constrains anything
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::Value(v) if !self.is_all() => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Selection::parse(raw)
    }
}

/// Inclusive numeric range with the span it covers when untouched
///
/// The default span matters for records that have no value for the field:
/// they pass while the range covers its whole default span and fail once it
/// has been narrowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    min: f64,
    max: f64,
    default_min: f64,
    default_max: f64,
}

impl NumericRange {
    /// A range covering its full default span `[min, max]`
    pub fn full(min: f64, max: f64) -> Self {
        let (min, max) = ordered(min, max);
        Self {
            min,
            max,
            default_min: min,
            default_max: max,
        }
    }

    /// Narrow the range to `[min, max]`, keeping the default span
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn narrowed(self, min: f64, max: f64) -> Self {
        let (min, max) = ordered(min, max);
        Self { min, max, ..self }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// True while the range still covers its whole default span
    pub fn is_full(&self) -> bool {
        self.min <= self.default_min && self.max >= self.default_max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Decide whether a record value (or its absence) passes this range
    pub fn admits(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => self.contains(v),
            None => self.is_full(),
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Complete predicate configuration of a view
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState<F: FieldKey> {
    search: String,
    selections: BTreeMap<F, Selection>,
    ranges: BTreeMap<F, NumericRange>,
    required: BTreeSet<F>,
    quick_filters: BTreeSet<String>,
}

impl<F: FieldKey> Default for FilterState<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            selections: BTreeMap::new(),
            ranges: BTreeMap::new(),
            required: BTreeSet::new(),
            quick_filters: BTreeSet::new(),
        }
    }
}

impl<F: FieldKey> FilterState<F> {
    /// A state with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the exact-match selection for a field
    ///
    /// Selecting "all" removes the constraint.
    pub fn with_selection(mut self, field: F, selection: impl Into<Selection>) -> Self {
        let selection = selection.into();
        if selection.is_all() {
            self.selections.remove(&field);
        } else {
            self.selections.insert(field, selection);
        }
        self
    }

    pub fn with_range(mut self, field: F, range: NumericRange) -> Self {
        self.ranges.insert(field, range);
        self
    }

    pub fn without_range(mut self, field: F) -> Self {
        self.ranges.remove(&field);
        self
    }

    /// Require (or stop requiring) a non-blank value for a field ("has phone")
    pub fn with_required(mut self, field: F, required: bool) -> Self {
        if required {
            self.required.insert(field);
        } else {
            self.required.remove(&field);
        }
        self
    }

    pub fn with_quick_filter(mut self, id: impl Into<String>, active: bool) -> Self {
        let id = id.into();
        if active {
            self.quick_filters.insert(id);
        } else {
            self.quick_filters.remove(&id);
        }
        self
    }

    /// Flip a quick filter on or off
    pub fn toggle_quick_filter(self, id: &str) -> Self {
        let active = !self.quick_filters.contains(id);
        self.with_quick_filter(id, active)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selection(&self, field: F) -> &Selection {
        static ALL: Selection = Selection::All;
        self.selections.get(&field).unwrap_or(&ALL)
    }

    pub fn selections(&self) -> impl Iterator<Item = (F, &Selection)> {
        self.selections.iter().map(|(field, selection)| (*field, selection))
    }

    pub fn range(&self, field: F) -> Option<&NumericRange> {
        self.ranges.get(&field)
    }

    pub fn ranges(&self) -> impl Iterator<Item = (F, &NumericRange)> {
        self.ranges.iter().map(|(field, range)| (*field, range))
    }

    pub fn required(&self) -> impl Iterator<Item = F> + '_ {
        self.required.iter().copied()
    }

    pub fn is_required(&self, field: F) -> bool {
        self.required.contains(&field)
    }

    pub fn quick_filters(&self) -> impl Iterator<Item = &str> {
        self.quick_filters.iter().map(String::as_str)
    }

    pub fn has_quick_filter(&self, id: &str) -> bool {
        self.quick_filters.contains(id)
    }

    /// Number of constraints currently narrowing the result
    pub fn active_count(&self) -> usize {
        let search = usize::from(!self.search.trim().is_empty());
        let selections = self.selections.values().filter(|s| !s.is_all()).count();
        let ranges = self.ranges.values().filter(|r| !r.is_full()).count();
        search + selections + ranges + self.required.len() + self.quick_filters.len()
    }

    /// True when no constraint is active
    pub fn is_unconstrained(&self) -> bool {
        self.active_count() == 0
    }
}
