//! In-memory implementation of RecordSource for testing and development

use crate::core::{Record, RecordSource};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory record source
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Records are returned in insertion order; replacing a record keeps its slot.
#[derive(Clone)]
pub struct InMemoryRecordSource<R: Record> {
    records: Arc<RwLock<IndexMap<Uuid, R>>>,
}

impl<R: Record> InMemoryRecordSource<R> {
    /// Create an empty in-memory record source
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a source holding `records`
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id(), record))
            .collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert a record, replacing any record with the same id
    pub fn upsert(&self, record: R) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        records.insert(record.id(), record);

        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn remove(&self, id: &Uuid) -> Result<Option<R>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records.shift_remove(id))
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<R>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(id).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.len())
    }
}

impl<R: Record> Default for InMemoryRecordSource<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordSource<R> for InMemoryRecordSource<R> {
    async fn fetch_records(&self) -> Result<Vec<R>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Student;

    #[tokio::test]
    async fn test_fetch_preserves_insertion_order() {
        let source = InMemoryRecordSource::with_records(vec![
            Student::new("S2", "Ben"),
            Student::new("S1", "Amy"),
        ]);

        let records = source.fetch_records().await.unwrap();
        let names: Vec<&str> = records.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Amy"]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let amy = Student::new("S1", "Amy");
        let ben = Student::new("S2", "Ben");
        let source = InMemoryRecordSource::with_records(vec![amy.clone(), ben]);

        source.upsert(amy.clone().with_grade("4")).unwrap();

        let records = source.fetch_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].grade.as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_remove() {
        let amy = Student::new("S1", "Amy");
        let source = InMemoryRecordSource::with_records(vec![amy.clone()]);

        let removed = source.remove(&amy.id).unwrap();
        assert_eq!(removed.map(|s| s.name), Some("Amy".to_string()));
        assert_eq!(source.len().unwrap(), 0);
        assert!(source.get(&amy.id).unwrap().is_none());
        assert!(source.fetch_records().await.unwrap().is_empty());
    }
}
