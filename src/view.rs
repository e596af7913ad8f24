//! View state machine and the controller that owns a roster view
//!
//! [`ViewState`] bundles filter, sort and page state. It is never mutated in
//! place: [`ViewState::apply`] returns the next state for a [`ViewAction`].
//! Any change to the filter or sort sends the view back to page 1.

use crate::config::ResolvedView;
use crate::core::{FieldKey, PaginationMeta, QueryParams, Record, RecordSource};
use crate::filter::{FilterState, NumericRange, Selection};
use crate::paginate::{PageState, Paginator};
use crate::pipeline::{OrderedView, Pipeline, resolve_indices};
use crate::sort::SortState;
use crate::stats::{NumericSummary, Tally};
use anyhow::Result;
use std::sync::Arc;

/// A user interaction on a roster view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction<F: FieldKey> {
    /// Replace the free-text search term
    Search(String),
    /// Set the exact-match selection of a field
    Select(F, Selection),
    /// Set a numeric range on a field
    Range(F, NumericRange),
    /// Remove the numeric range of a field
    ClearRange(F),
    /// Require or stop requiring a non-blank value
    Require(F, bool),
    /// Flip a quick filter on or off
    ToggleQuickFilter(String),
    /// Replace the whole filter state
    SetFilter(FilterState<F>),
    /// Back to an unconstrained filter
    ClearFilters,
    /// Replace the sort state
    Sort(SortState<F>),
    /// Column-header click on a field
    SortBy(F),
    NextPage,
    PrevPage,
    GoToPage(usize),
    ResetPage,
}

/// Filter, sort and page state of a view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F: FieldKey> {
    filter: FilterState<F>,
    sort: SortState<F>,
    page: PageState,
}

impl<F: FieldKey> Default for ViewState<F> {
    fn default() -> Self {
        Self::new(PageState::default())
    }
}

impl<F: FieldKey> ViewState<F> {
    /// Unfiltered, default sort, on the given page
    ///
    /// The page is clamped once the filtered length is known.
    pub fn new(page: PageState) -> Self {
        Self {
            filter: FilterState::new(),
            sort: SortState::default(),
            page,
        }
    }

    /// Build the state a query string describes
    ///
    /// The requested page is kept as-is; it is clamped once the filtered
    /// length is known.
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            filter: params.filter_state(),
            sort: params.sort_state(),
            page: PageState::new(params.limit()).at(params.page()),
        }
    }

    pub fn filter(&self) -> &FilterState<F> {
        &self.filter
    }

    pub fn sort(&self) -> &SortState<F> {
        &self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    /// Replace the filter; resets to page 1 if it changed
    pub fn with_filter(self, filter: FilterState<F>) -> Self {
        if filter == self.filter {
            return self;
        }
        Self {
            filter,
            page: self.page.first(),
            ..self
        }
    }

    /// Replace the sort; resets to page 1 if it changed
    pub fn with_sort(self, sort: SortState<F>) -> Self {
        if sort == self.sort {
            return self;
        }
        Self {
            sort,
            page: self.page.first(),
            ..self
        }
    }

    fn with_paginator(self, total_filtered: usize, step: impl FnOnce(&mut Paginator)) -> Self {
        let mut paginator = Paginator::from_state(self.page, total_filtered);
        step(&mut paginator);
        Self {
            page: paginator.state(),
            ..self
        }
    }

    /// The state after `action`
    ///
    /// `total_filtered` is the length of the current filtered view; page
    /// actions clamp against it.
    pub fn apply(self, action: ViewAction<F>, total_filtered: usize) -> Self {
        match action {
            ViewAction::Search(term) => {
                let filter = self.filter.clone().with_search(term);
                self.with_filter(filter)
            }
            ViewAction::Select(field, selection) => {
                let filter = self.filter.clone().with_selection(field, selection);
                self.with_filter(filter)
            }
            ViewAction::Range(field, range) => {
                let filter = self.filter.clone().with_range(field, range);
                self.with_filter(filter)
            }
            ViewAction::ClearRange(field) => {
                let filter = self.filter.clone().without_range(field);
                self.with_filter(filter)
            }
            ViewAction::Require(field, required) => {
                let filter = self.filter.clone().with_required(field, required);
                self.with_filter(filter)
            }
            ViewAction::ToggleQuickFilter(id) => {
                let filter = self.filter.clone().toggle_quick_filter(&id);
                self.with_filter(filter)
            }
            ViewAction::SetFilter(filter) => self.with_filter(filter),
            ViewAction::ClearFilters => self.with_filter(FilterState::new()),
            ViewAction::Sort(sort) => self.with_sort(sort),
            ViewAction::SortBy(field) => {
                let sort = self.sort.toggled(field);
                self.with_sort(sort)
            }
            ViewAction::NextPage => self.with_paginator(total_filtered, Paginator::next_page),
            ViewAction::PrevPage => self.with_paginator(total_filtered, Paginator::prev_page),
            ViewAction::GoToPage(page) => {
                self.with_paginator(total_filtered, |paginator| paginator.go_to_page(page))
            }
            ViewAction::ResetPage => self.with_paginator(total_filtered, Paginator::reset),
        }
    }
}

/// The visible page of a view
#[derive(Debug, Clone)]
pub struct ViewPage<'a, R> {
    /// Records on the current page, in display order
    pub records: Vec<&'a R>,

    /// Number of records passing the filter
    pub total_filtered: usize,

    /// Number of pages (at least 1)
    pub total_pages: usize,

    pub meta: PaginationMeta,
}

/// Controller for one roster screen
///
/// Owns the current record snapshot, the view state and a memoizing pipeline.
/// Replacing the snapshot resets the view to page 1.
pub struct RecordView<R: Record> {
    records: Arc<[R]>,
    state: ViewState<R::Field>,
    pipeline: Pipeline<R>,
}

impl<R: Record> RecordView<R> {
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        Self {
            records: records.into(),
            state: ViewState::new(PageState::new(page_size)),
            pipeline: Pipeline::new(),
        }
    }

    /// Build a view from resolved configuration
    pub fn from_config(config: &ResolvedView<R::Field>, records: Vec<R>) -> Self {
        let state = ViewState::new(PageState::new(config.page_size)).with_sort(config.default_sort);
        let pipeline = Pipeline::new()
            .with_search_fields(config.search_fields.clone())
            .with_quick_filters(config.catalog.clone());
        Self {
            records: records.into(),
            state,
            pipeline,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn state(&self) -> &ViewState<R::Field> {
        &self.state
    }

    pub fn pipeline(&self) -> &Pipeline<R> {
        &self.pipeline
    }

    /// Swap in a new record snapshot and go back to page 1
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records.into();
        self.state = self.state.clone().apply(ViewAction::ResetPage, 0);
    }

    /// Refetch the snapshot from a record source
    ///
    /// On error the previous snapshot is kept. Returns the new record count.
    pub async fn refresh<S>(&mut self, source: &S) -> Result<usize>
    where
        S: RecordSource<R> + ?Sized,
    {
        let records = source.fetch_records().await?;
        let count = records.len();
        tracing::info!(resource = R::resource_name(), count, "Refreshed records");
        self.replace_records(records);
        Ok(count)
    }

    /// Replace the whole view state (page is clamped on the next read)
    pub fn set_state(&mut self, state: ViewState<R::Field>) {
        self.state = state;
    }

    /// Apply a user action
    pub fn dispatch(&mut self, action: ViewAction<R::Field>) {
        let total = self.ordered().len();
        self.state = self.state.clone().apply(action, total);
    }

    fn ordered(&mut self) -> OrderedView {
        self.pipeline
            .run(&self.records, &self.state.filter, &self.state.sort)
    }

    /// Every record passing the filter, in display order
    pub fn filtered(&mut self) -> Vec<&R> {
        let view = self.ordered();
        view.resolve(&self.records)
    }

    pub fn total_filtered(&mut self) -> usize {
        self.ordered().len()
    }

    /// The current page
    pub fn page(&mut self) -> ViewPage<'_, R> {
        let view = self.ordered();
        let paginator = Paginator::from_state(self.state.page, view.len());
        self.state.page = paginator.state();

        ViewPage {
            records: resolve_indices(paginator.slice(view.indices()), &self.records),
            total_filtered: view.len(),
            total_pages: paginator.total_pages(),
            meta: paginator.meta(),
        }
    }

    /// Count filtered records per value of `field`
    pub fn tally(&mut self, field: R::Field) -> Tally {
        Tally::of(self.filtered(), field)
    }

    /// Summarize a numeric field over the filtered records
    pub fn summarize(&mut self, field: R::Field) -> NumericSummary {
        NumericSummary::of(self.filtered(), field)
    }
}
