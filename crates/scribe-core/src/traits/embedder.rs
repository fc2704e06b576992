//! Embedder traits and related types.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ScribeResult;
use crate::types::EMBEDDING_DIM;

/// Core Embedder trait - learned text-embedding models implement this.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Encode a single text.
    async fn embed(&self, text: &str) -> ScribeResult<Vec<f32>>;

    /// Get the dimension of the embeddings.
    fn dimension(&self) -> usize;

    /// Get the model name.
    fn model_name(&self) -> &str;
}

/// Resolves an embedding model on first use.
///
/// Loading may be expensive (downloading weights, probing a server), so it is
/// attempted at most once per [`ModelHandle`](crate::embedding::ModelHandle).
#[async_trait]
pub trait EmbedderLoader: Send + Sync {
    /// Load the model, or explain why it is unavailable.
    async fn load(&self) -> ScribeResult<Arc<dyn Embedder>>;

    /// Name of the model this loader resolves.
    fn model_name(&self) -> &str;
}

/// Embedder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderConfig {
    /// Provider type.
    #[serde(default)]
    pub provider: EmbedderProvider,
    /// Model name/identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Embedding dimensions the model must produce.
    #[serde(default = "default_embedding_dims")]
    pub embedding_dims: usize,
    /// Base URL for API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "all-minilm".to_string()
}

fn default_embedding_dims() -> usize {
    EMBEDDING_DIM
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            provider: EmbedderProvider::default(),
            model: default_model(),
            embedding_dims: default_embedding_dims(),
            base_url: None,
        }
    }
}

/// Embedder provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderProvider {
    /// No learned model; every embedding uses the hash fallback.
    #[default]
    None,
    Ollama,
}
