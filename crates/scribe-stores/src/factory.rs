//! Factory for creating document store providers.

use std::sync::Arc;

use scribe_core::error::ScribeResult;
use scribe_core::traits::{DocumentStore, DocumentStoreConfig, DocumentStoreProvider};

use crate::memory::InMemoryDocumentStore;

/// Factory for creating document store providers.
pub struct DocumentStoreFactory;

impl DocumentStoreFactory {
    /// Create the configured store; `None` when persistence is disabled.
    pub async fn create(
        config: &DocumentStoreConfig,
    ) -> ScribeResult<Option<Arc<dyn DocumentStore>>> {
        match config.provider {
            DocumentStoreProvider::None => Ok(None),

            DocumentStoreProvider::Memory => Ok(Some(Arc::new(InMemoryDocumentStore::new()))),

            #[cfg(feature = "mongodb")]
            DocumentStoreProvider::MongoDB => {
                let store = crate::mongodb::MongoDocumentStore::new(config).await?;
                Ok(Some(Arc::new(store)))
            }

            #[allow(unreachable_patterns)]
            _ => Err(scribe_core::ScribeError::Configuration(format!(
                "Document store provider {:?} is not enabled in this build",
                config.provider
            ))),
        }
    }

    /// Create an in-memory store.
    pub fn memory() -> Arc<dyn DocumentStore> {
        Arc::new(InMemoryDocumentStore::new())
    }

    /// Create a MongoDB store for `url` using the default database and collection.
    #[cfg(feature = "mongodb")]
    pub async fn mongodb(url: &str) -> ScribeResult<Arc<dyn DocumentStore>> {
        let config = DocumentStoreConfig {
            provider: DocumentStoreProvider::MongoDB,
            url: url.to_string(),
            ..Default::default()
        };
        let store = crate::mongodb::MongoDocumentStore::new(&config).await?;
        Ok(Arc::new(store))
    }
}
