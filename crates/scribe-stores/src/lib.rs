//! scribe-stores - Document store implementations for scribe.
//!
//! Stores receive one [`StoredExtraction`] per processed upload that carries
//! a correlation identifier, keyed by that identifier.
//!
//! # Supported Backends
//!
//! - **Memory** - process-local map, useful for tests and demos
//! - **MongoDB** (feature: `mongodb`) - updates the uploaded file's document
//!   in the configured collection

mod factory;
mod memory;

#[cfg(feature = "mongodb")]
mod mongodb;

pub use factory::DocumentStoreFactory;
pub use memory::InMemoryDocumentStore;

#[cfg(feature = "mongodb")]
pub use self::mongodb::MongoDocumentStore;

// Re-export core types for convenience
pub use scribe_core::traits::{DocumentStore, DocumentStoreConfig, DocumentStoreProvider};
pub use scribe_core::types::StoredExtraction;
