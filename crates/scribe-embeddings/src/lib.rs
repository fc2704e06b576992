//! scribe-embeddings - Embedding model providers for scribe.
//!
//! # Supported Providers
//!
//! - **Ollama** - local models served by Ollama; the default `all-minilm`
//!   model produces the 384-dimension vectors scribe stores.
//!
//! # Example
//!
//! ```ignore
//! use scribe_core::{EmbedderConfig, EmbedderProvider, EmbeddingGenerator};
//! use scribe_embeddings::EmbedderFactory;
//!
//! let config = EmbedderConfig {
//!     provider: EmbedderProvider::Ollama,
//!     ..Default::default()
//! };
//! let generator = EmbeddingGenerator::new(EmbedderFactory::model_handle(&config));
//! let vector = generator.embed("Newton's second law").await;
//! ```

mod factory;
mod ollama;

pub use factory::EmbedderFactory;
pub use ollama::{OllamaEmbedder, OllamaLoader};

// Re-export core types for convenience
pub use scribe_core::traits::{Embedder, EmbedderConfig, EmbedderLoader, EmbedderProvider};
