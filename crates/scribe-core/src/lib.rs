//! scribe-core - Core library for scribe.
//!
//! This crate turns an uploaded PDF or image into plain text plus a
//! 384-dimension embedding. It provides the [`ExtractionCoordinator`], the
//! [`EmbeddingGenerator`] with its hash fallback, the collaborator traits, and
//! configuration.
//!
//! # Example
//!
//! ```ignore
//! use scribe_core::{EmbeddingGenerator, ExtractionCoordinator, ExtractionRequest};
//! use scribe_extractors::{DocumentExtractionConfig, ExtractorFactory};
//!
//! let pipeline = ExtractorFactory::default_pipeline(None, DocumentExtractionConfig::default())?;
//! let coordinator = ExtractionCoordinator::new(pipeline, EmbeddingGenerator::fallback_only());
//!
//! let request = ExtractionRequest::new(bytes, "lecture.pdf").with_correlation_id("65f1c0ffee");
//! let response = coordinator.process(request).await?;
//! println!("{} words", response.metadata.word_count);
//! ```

pub mod config;
pub mod coordinator;
pub mod embedding;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{ExtractionConfig, ScribeConfig, ServerConfig};
pub use coordinator::ExtractionCoordinator;
pub use embedding::{hash_embedding, EmbeddingGenerator, ModelHandle, ModelState};
pub use error::{ErrorCode, ScribeError, ScribeResult};
pub use traits::{
    DocumentStore, DocumentStoreConfig, DocumentStoreProvider, Embedder, EmbedderConfig,
    EmbedderLoader, EmbedderProvider,
};
pub use types::{
    parse_labels, EmbeddingVector, ExtractionRequest, ExtractionResponse, Labels,
    ResponseMetadata, StoredExtraction, EMBEDDING_DIM,
};
