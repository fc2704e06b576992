//! Fixed-dimension embedding vectors.

use serde::Serialize;

use crate::error::{ErrorCode, ScribeError, ScribeResult};

/// Dimension of every embedding produced by scribe.
pub const EMBEDDING_DIM: usize = 384;

/// Embedding vector of exactly [`EMBEDDING_DIM`] values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    /// All-zero vector.
    pub fn zeros() -> Self {
        Self(vec![0.0; EMBEDDING_DIM])
    }

    /// Wrap `values`, rejecting any other length than [`EMBEDDING_DIM`].
    pub fn new(values: Vec<f32>) -> ScribeResult<Self> {
        if values.len() != EMBEDDING_DIM {
            return Err(ScribeError::Embedding {
                message: format!(
                    "expected {} dimensions, got {}",
                    EMBEDDING_DIM,
                    values.len()
                ),
                code: ErrorCode::EmbDimensionMismatch,
                source: None,
            });
        }
        Ok(Self(values))
    }

    /// Wrap values from a source whose dimension was already checked.
    pub(crate) fn from_exact(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// View the values.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Take the values.
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl AsRef<[f32]> for EmbeddingVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

impl TryFrom<Vec<f32>> for EmbeddingVector {
    type Error = ScribeError;

    fn try_from(values: Vec<f32>) -> ScribeResult<Self> {
        Self::new(values)
    }
}

impl From<EmbeddingVector> for Vec<f32> {
    fn from(vector: EmbeddingVector) -> Self {
        vector.0
    }
}
