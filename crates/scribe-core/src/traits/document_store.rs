//! Document store trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ScribeResult;
use crate::types::StoredExtraction;

/// Core DocumentStore trait - persistence backends for extraction results.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the record keyed by its correlation identifier.
    async fn upsert(&self, record: &StoredExtraction) -> ScribeResult<()>;

    /// Check that the store is reachable.
    async fn ping(&self) -> ScribeResult<()>;

    /// Get the store name.
    fn name(&self) -> &str;
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    /// Provider type.
    #[serde(default)]
    pub provider: DocumentStoreProvider,
    /// Connection string.
    #[serde(default = "default_url")]
    pub url: String,
    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,
    /// Collection holding one record per uploaded file.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "smartnotes".to_string()
}

fn default_collection() -> String {
    "files".to_string()
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            provider: DocumentStoreProvider::default(),
            url: default_url(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

/// Document store provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStoreProvider {
    /// Results are not persisted.
    #[default]
    None,
    Memory,
    MongoDB,
}
