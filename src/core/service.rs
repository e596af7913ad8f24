//! Service trait for the collaborator that supplies record snapshots

use crate::core::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Supplies the current records of a collection
///
/// Implementations wrap whatever backend holds the data. The framework is
/// agnostic to the underlying storage mechanism; it only needs a fresh,
/// fully materialized snapshot on every refetch.
#[async_trait]
pub trait RecordSource<R: Record>: Send + Sync {
    /// Fetch every record of the collection
    async fn fetch_records(&self) -> Result<Vec<R>>;
}
