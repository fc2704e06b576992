//! Lazily resolved embedding model.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::error::{ErrorCode, ScribeError, ScribeResult};
use crate::traits::{Embedder, EmbedderLoader};
use crate::types::EMBEDDING_DIM;

/// Resolution state of a [`ModelHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Nothing has asked for the model yet.
    Unresolved,
    /// The model loaded and produces [`EMBEDDING_DIM`] values.
    Available,
    /// Loading failed, produced the wrong dimension, or no model is configured.
    Unavailable,
}

impl ModelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelState::Unresolved => "not loaded",
            ModelState::Available => "loaded",
            ModelState::Unavailable => "not available",
        }
    }
}

/// Embedding model resolved at most once, on first use.
///
/// The outcome, including failure, is kept for the lifetime of the handle.
/// Concurrent first callers wait on the same resolution.
pub struct ModelHandle {
    loader: Option<Arc<dyn EmbedderLoader>>,
    model: OnceCell<Option<Arc<dyn Embedder>>>,
}

impl ModelHandle {
    /// Handle that resolves through `loader` on first use.
    pub fn new(loader: Arc<dyn EmbedderLoader>) -> Self {
        Self {
            loader: Some(loader),
            model: OnceCell::new(),
        }
    }

    /// Handle with no model; always unavailable.
    pub fn unavailable() -> Self {
        Self {
            loader: None,
            model: OnceCell::new_with(Some(None)),
        }
    }

    /// Handle around an already loaded model.
    pub fn preloaded(embedder: Arc<dyn Embedder>) -> ScribeResult<Self> {
        check_dimension(embedder.as_ref())?;
        Ok(Self {
            loader: None,
            model: OnceCell::new_with(Some(Some(embedder))),
        })
    }

    /// Current resolution state; never triggers loading.
    pub fn state(&self) -> ModelState {
        match self.model.get() {
            None => ModelState::Unresolved,
            Some(Some(_)) => ModelState::Available,
            Some(None) => ModelState::Unavailable,
        }
    }

    /// The model, loading it on first call.
    pub async fn resolve(&self) -> Option<Arc<dyn Embedder>> {
        self.model.get_or_init(|| self.load()).await.clone()
    }

    async fn load(&self) -> Option<Arc<dyn Embedder>> {
        let loader = self.loader.as_ref()?;

        let embedder = match loader.load().await {
            Ok(embedder) => embedder,
            Err(e) => {
                warn!(
                    model = loader.model_name(),
                    error = %e,
                    "Embedding model unavailable, using hash fallback"
                );
                return None;
            }
        };

        if let Err(e) = check_dimension(embedder.as_ref()) {
            warn!(
                model = embedder.model_name(),
                error = %e,
                "Embedding model rejected, using hash fallback"
            );
            return None;
        }

        info!(model = embedder.model_name(), "Embedding model loaded");
        Some(embedder)
    }
}

fn check_dimension(embedder: &dyn Embedder) -> ScribeResult<()> {
    if embedder.dimension() != EMBEDDING_DIM {
        return Err(ScribeError::Embedding {
            message: format!(
                "model {} produces {} dimensions, expected {}",
                embedder.model_name(),
                embedder.dimension(),
                EMBEDDING_DIM
            ),
            code: ErrorCode::EmbDimensionMismatch,
            source: None,
        });
    }
    Ok(())
}
