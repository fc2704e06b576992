//! Factory for creating embedding providers.

use std::sync::Arc;

use scribe_core::embedding::ModelHandle;
use scribe_core::error::ScribeResult;
use scribe_core::traits::{Embedder, EmbedderConfig, EmbedderLoader, EmbedderProvider};

use crate::ollama::{OllamaEmbedder, OllamaLoader};

/// Factory for creating embedding providers.
pub struct EmbedderFactory;

impl EmbedderFactory {
    /// Loader for the configured provider; `None` when no model is configured.
    pub fn loader(config: &EmbedderConfig) -> Option<Arc<dyn EmbedderLoader>> {
        match config.provider {
            EmbedderProvider::None => None,
            EmbedderProvider::Ollama => Some(Arc::new(OllamaLoader::new(config.clone()))),
        }
    }

    /// Model handle for the configured provider, resolved lazily on first use.
    pub fn model_handle(config: &EmbedderConfig) -> ModelHandle {
        match Self::loader(config) {
            Some(loader) => ModelHandle::new(loader),
            None => ModelHandle::unavailable(),
        }
    }

    /// Create an Ollama embedder with default configuration.
    pub fn ollama() -> ScribeResult<Arc<dyn Embedder>> {
        Self::ollama_with_model("all-minilm")
    }

    /// Create an Ollama embedder with a specific model.
    pub fn ollama_with_model(model: impl Into<String>) -> ScribeResult<Arc<dyn Embedder>> {
        let config = EmbedderConfig {
            provider: EmbedderProvider::Ollama,
            model: model.into(),
            ..Default::default()
        };
        Ok(Arc::new(OllamaEmbedder::new(config)?))
    }
}
