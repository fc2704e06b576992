//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::error::ScribeResult;
use scribe_core::traits::DocumentStore;
use scribe_core::types::StoredExtraction;

/// Document store kept in process memory; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    records: RwLock<HashMap<String, StoredExtraction>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record stored under `correlation_id`.
    pub async fn get(&self, correlation_id: &str) -> Option<StoredExtraction> {
        self.records.read().await.get(correlation_id).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn upsert(&self, record: &StoredExtraction) -> ScribeResult<()> {
        self.records
            .write()
            .await
            .insert(record.correlation_id.clone(), record.clone());
        Ok(())
    }

    async fn ping(&self) -> ScribeResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
