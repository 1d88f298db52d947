//! An in-process [`RecordStore`], used in tests and for throwaway notifiers.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::persistence::{
    error::PersistenceError,
    traits::{Record, RecordStore},
};

/// Keeps the record in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    record: RwLock<Record>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `record`.
    pub fn with_record(record: Record) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }

    /// Returns a copy of the current contents.
    pub async fn snapshot(&self) -> Record {
        self.record.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn load(&self) -> Result<Record, PersistenceError> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &Record) -> Result<(), PersistenceError> {
        *self.record.write().await = record.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = InMemoryRecordStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_contents() {
        let store = InMemoryRecordStore::with_record(Record::from([(
            "old".to_string(),
            "old".to_string(),
        )]));

        let replacement = Record::from([("new".to_string(), "new".to_string())]);
        store.save(&replacement).await.unwrap();

        assert_eq!(store.snapshot().await, replacement);
    }
}
