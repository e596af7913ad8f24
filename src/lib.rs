//! # roster-view
//!
//! Filter, sort and paginate pipeline behind the student and teacher
//! management screens of a tuition-center dashboard.
//!
//! ## Features
//!
//! - **Typed Records**: Field access through a per-record field enum instead of string keys
//! - **Predicate Set**: Search, exact-match, range, "has value" and quick-filter tags
//! - **Locale-Aware Sorting**: Stable, direction-aware, missing values always last
//! - **Memoized Pipeline**: Recomputes only when records, filter or sort change
//! - **Pagination**: Clamped page navigation with page metadata
//! - **Immutable View State**: Every user action yields a new state
//! - **Configuration-Based**: Page size, default sort and quick filters from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster_view::prelude::*;
//!
//! let students = vec![
//!     Student::new("STU-001", "Amy").with_grade("3"),
//!     Student::new("STU-002", "Ben").with_grade("4"),
//!     Student::new("STU-003", "Cid").with_grade("3"),
//! ];
//!
//! let mut view = RecordView::new(students, 10);
//! view.dispatch(ViewAction::Select(StudentField::Grade, Selection::from("3")));
//!
//! let page = view.page();
//! assert_eq!(page.total_filtered, 2);
//! assert_eq!(page.records[0].name, "Amy");
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod export;
pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod sort;
pub mod stats;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        error::{ConfigError, ExportError, RosterError},
        field::{FieldKey, FieldValue},
        query::{PaginationMeta, QueryParams},
        record::Record,
        service::RecordSource,
    };

    // === Macros ===
    pub use crate::record_fields;

    // === Records ===
    pub use crate::entities::{
        Student, StudentField, StudentStatus, Teacher, TeacherField, TeacherStatus,
    };

    // === Pipeline ===
    pub use crate::filter::{
        Condition, FilterState, NumericRange, PredicateSet, QuickFilter, QuickFilterCatalog,
        Selection,
    };
    pub use crate::paginate::{PageState, Paginator};
    pub use crate::pipeline::{OrderedView, Pipeline, filter_and_sort};
    pub use crate::sort::{SortDirection, SortState, compare_records};
    pub use crate::view::{RecordView, ViewAction, ViewPage, ViewState};

    // === Stats & Export ===
    pub use crate::export::{ExportFormat, export_records};
    pub use crate::stats::{NumericSummary, Tally};

    // === Storage ===
    pub use crate::storage::InMemoryRecordSource;

    // === Config ===
    pub use crate::config::{ResolvedView, ViewConfig, ViewsConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
