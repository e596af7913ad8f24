//! Pipeline orchestrator: filter, then sort, with memoization
//!
//! [`filter_and_sort`] is a pure function of its inputs. [`Pipeline`] wraps it
//! with a single-entry cache keyed by the record snapshot (by `Arc` identity)
//! and the filter and sort states (by value).

use crate::core::Record;
use crate::filter::{FilterState, PredicateSet, QuickFilterCatalog};
use crate::sort::{SortState, sort_indices};
use std::sync::Arc;

/// Filter `records`, then stable-sort the survivors
///
/// Returns indices into `records` in display order. Only records that pass
/// the filter are sorted.
pub fn filter_and_sort<R: Record>(
    records: &[R],
    filter: &FilterState<R::Field>,
    sort: &SortState<R::Field>,
    search_fields: &[R::Field],
    catalog: &QuickFilterCatalog<R::Field>,
) -> Vec<usize> {
    let predicates = PredicateSet::<R>::new(filter, search_fields, catalog);
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| predicates.matches(record))
        .map(|(index, _)| index)
        .collect();
    sort_indices(records, &mut indices, sort);
    indices
}

/// Ordered, filtered view over a record snapshot
///
/// Holds indices rather than records; resolve them against the snapshot the
/// view was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderedView {
    indices: Arc<[usize]>,
}

impl OrderedView {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Resolve every index against `records`
    pub fn resolve<'a, R>(&self, records: &'a [R]) -> Vec<&'a R> {
        resolve_indices(&self.indices, records)
    }
}

pub(crate) fn resolve_indices<'a, R>(indices: &[usize], records: &'a [R]) -> Vec<&'a R> {
    indices.iter().filter_map(|&index| records.get(index)).collect()
}

struct Memo<R: Record> {
    records: Arc<[R]>,
    filter: FilterState<R::Field>,
    sort: SortState<R::Field>,
    view: OrderedView,
}

/// Memoizing orchestrator for one view
///
/// The searchable fields and quick filter catalog are fixed per pipeline.
pub struct Pipeline<R: Record> {
    search_fields: Vec<R::Field>,
    catalog: QuickFilterCatalog<R::Field>,
    memo: Option<Memo<R>>,
    recomputations: usize,
}

impl<R: Record> Default for Pipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Pipeline<R> {
    /// A pipeline searching `R::searchable_fields()` with no quick filters
    pub fn new() -> Self {
        Self {
            search_fields: Vec::new(),
            catalog: QuickFilterCatalog::default(),
            memo: None,
            recomputations: 0,
        }
    }

    /// Search these fields instead of the record's defaults
    pub fn with_search_fields(mut self, fields: Vec<R::Field>) -> Self {
        self.search_fields = fields;
        self.memo = None;
        self
    }

    pub fn with_quick_filters(mut self, catalog: QuickFilterCatalog<R::Field>) -> Self {
        self.catalog = catalog;
        self.memo = None;
        self
    }

    pub fn catalog(&self) -> &QuickFilterCatalog<R::Field> {
        &self.catalog
    }

    pub fn search_fields(&self) -> &[R::Field] {
        if self.search_fields.is_empty() {
            R::searchable_fields()
        } else {
            &self.search_fields
        }
    }

    /// Filtered and sorted view of `records`
    ///
    /// Recomputes only when the snapshot, the filter or the sort differ from
    /// the previous call.
    pub fn run(
        &mut self,
        records: &Arc<[R]>,
        filter: &FilterState<R::Field>,
        sort: &SortState<R::Field>,
    ) -> OrderedView {
        if let Some(memo) = &self.memo
            && Arc::ptr_eq(&memo.records, records)
            && memo.filter == *filter
            && memo.sort == *sort
        {
            tracing::debug!(resource = R::resource_name(), "Pipeline cache hit");
            return memo.view.clone();
        }

        let view = OrderedView::new(filter_and_sort(
            records,
            filter,
            sort,
            &self.search_fields,
            &self.catalog,
        ));
        self.recomputations += 1;
        tracing::debug!(
            resource = R::resource_name(),
            total = records.len(),
            filtered = view.len(),
            sort = %sort.to_expr(),
            "Pipeline recomputed"
        );

        self.memo = Some(Memo {
            records: Arc::clone(records),
            filter: filter.clone(),
            sort: *sort,
            view: view.clone(),
        });
        view
    }

    /// Drop the cached result
    pub fn invalidate(&mut self) {
        self.memo = None;
    }

    /// How many times the pipeline has actually recomputed
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
