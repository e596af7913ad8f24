//! Evaluation of a [`FilterState`] against single records

use super::{FilterState, QuickFilter, QuickFilterCatalog};
use crate::core::Record;
use chrono::{DateTime, Utc};

/// A filter state prepared for repeated evaluation
///
/// Preparation lowercases the search term once and resolves active quick
/// filter ids against the catalog. Ids missing from the catalog are ignored.
pub struct PredicateSet<'a, R: Record> {
    filter: &'a FilterState<R::Field>,
    search_fields: &'a [R::Field],
    needle: String,
    quick_filters: Vec<&'a QuickFilter<R::Field>>,
    reference_time: DateTime<Utc>,
}

impl<'a, R: Record> PredicateSet<'a, R> {
    /// Prepare `filter` for evaluation
    ///
    /// An empty `search_fields` slice falls back to `R::searchable_fields()`.
    pub fn new(
        filter: &'a FilterState<R::Field>,
        search_fields: &'a [R::Field],
        catalog: &'a QuickFilterCatalog<R::Field>,
    ) -> Self {
        let search_fields = if search_fields.is_empty() {
            R::searchable_fields()
        } else {
            search_fields
        };

        let quick_filters = filter
            .quick_filters()
            .filter_map(|id| {
                let found = catalog.get(id);
                if found.is_none() {
                    tracing::warn!(
                        resource = R::resource_name(),
                        quick_filter = id,
                        "Ignoring unknown quick filter"
                    );
                }
                found
            })
            .collect();

        Self {
            filter,
            search_fields,
            needle: filter.search().trim().to_lowercase(),
            quick_filters,
            reference_time: catalog.reference_time(),
        }
    }

    /// True iff the record passes every predicate category
    pub fn matches(&self, record: &R) -> bool {
        self.matches_search(record)
            && self.matches_selections(record)
            && self.matches_ranges(record)
            && self.matches_required(record)
            && self.matches_quick_filters(record)
    }

    /// Case-insensitive substring match over the searchable fields
    pub fn matches_search(&self, record: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        self.search_fields.iter().any(|field| {
            record
                .field_value(*field)
                .is_some_and(|value| value.render().to_lowercase().contains(&self.needle))
        })
    }

    /// Exact, case-sensitive match for every non-"all" selection
    pub fn matches_selections(&self, record: &R) -> bool {
        self.filter.selections().all(|(field, selection)| {
            let Some(expected) = selection.value() else {
                return true;
            };
            record
                .field_value(field)
                .is_some_and(|value| value.render() == expected)
        })
    }

    pub fn matches_ranges(&self, record: &R) -> bool {
        self.filter.ranges().all(|(field, range)| {
            let value = record
                .present_value(field)
                .and_then(|value| value.as_number());
            range.admits(value)
        })
    }

    /// Required fields must be non-blank after trimming
    pub fn matches_required(&self, record: &R) -> bool {
        self.filter
            .required()
            .all(|field| record.present_value(field).is_some())
    }

    pub fn matches_quick_filters(&self, record: &R) -> bool {
        self.quick_filters
            .iter()
            .all(|quick| quick.matches(record, self.reference_time))
    }
}
