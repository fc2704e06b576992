//! Ollama embedding provider implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scribe_core::error::{ScribeError, ScribeResult};
use scribe_core::traits::{Embedder, EmbedderConfig, EmbedderLoader};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding provider.
pub struct OllamaEmbedder {
    client: Client,
    endpoint: url::Url,
    config: EmbedderConfig,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder.
    ///
    /// `config.embedding_dims` is taken on trust; [`OllamaLoader`] measures it instead.
    pub fn new(config: EmbedderConfig) -> ScribeResult<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let endpoint = url::Url::parse(&base_url)
            .and_then(|u| u.join("api/embeddings"))
            .map_err(|e| ScribeError::Configuration(format!("Invalid Ollama URL: {}", e)))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ScribeError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Endpoint embeddings are requested from.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> ScribeResult<Vec<f32>> {
        let request = OllamaEmbeddingRequest {
            model: &self.config.model,
            prompt: text,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| ScribeError::embedding(format!("Failed to call Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(ScribeError::embedding(format!(
                "Ollama embedding error ({}): {}",
                status, error
            )));
        }

        let result: OllamaEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ScribeError::embedding(format!("Failed to parse response: {}", e)))?;

        Ok(result.embedding)
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dims
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Loads an Ollama model by embedding a sample text once.
///
/// The sample confirms the server is reachable and the model exists, and
/// measures the real dimension so a mismatched model is rejected up front.
pub struct OllamaLoader {
    config: EmbedderConfig,
}

impl OllamaLoader {
    pub fn new(config: EmbedderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EmbedderLoader for OllamaLoader {
    async fn load(&self) -> ScribeResult<Arc<dyn Embedder>> {
        let sample = OllamaEmbedder::new(self.config.clone())?;
        let vector = sample
            .embed("dimension check")
            .await
            .map_err(|e| ScribeError::embedding_load(e.to_string()))?;

        debug!(model = %self.config.model, dims = vector.len(), "Loaded Ollama model");

        let config = EmbedderConfig {
            embedding_dims: vector.len(),
            ..self.config.clone()
        };
        Ok(Arc::new(OllamaEmbedder::new(config)?))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
