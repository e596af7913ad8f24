//! Core module containing fundamental traits and types for roster views

pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod service;

pub use error::{ConfigError, ExportError, RosterError};
pub use field::{FieldKey, FieldValue};
pub use query::{PaginationMeta, QueryParams};
pub use record::Record;
pub use service::RecordSource;
