//! Text embeddings with a learned model and a deterministic fallback.

mod hashing;
mod model;

pub use hashing::{hash_embedding, MAX_HASHED_TOKENS};
pub use model::{ModelHandle, ModelState};

use tracing::{debug, warn};

use crate::types::EmbeddingVector;

/// Turns text into an [`EmbeddingVector`]; never fails.
///
/// Uses the model behind the [`ModelHandle`] when it resolves, the hash
/// fallback otherwise. A model error on a single call is logged and answered
/// with the fallback vector.
pub struct EmbeddingGenerator {
    model: ModelHandle,
}

impl EmbeddingGenerator {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    /// Generator that only ever uses the hash fallback.
    pub fn fallback_only() -> Self {
        Self::new(ModelHandle::unavailable())
    }

    /// State of the underlying model.
    pub fn model_state(&self) -> ModelState {
        self.model.state()
    }

    /// Embed `text`; always [`EMBEDDING_DIM`](crate::types::EMBEDDING_DIM) values.
    pub async fn embed(&self, text: &str) -> EmbeddingVector {
        let Some(model) = self.model.resolve().await else {
            debug!("No embedding model, using hash fallback");
            return hash_embedding(text);
        };

        // Dimension was checked when the handle resolved.
        match model.embed(text).await {
            Ok(values) => EmbeddingVector::from_exact(values),
            Err(e) => {
                warn!(
                    model = model.model_name(),
                    error = %e,
                    "Embedding failed, using hash fallback"
                );
                hash_embedding(text)
            }
        }
    }
}
