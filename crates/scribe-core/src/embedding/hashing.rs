//! Deterministic bag-of-words fallback embedding.

use crate::types::{EmbeddingVector, EMBEDDING_DIM};

/// Tokens considered per text; keeps the fallback constant-time in document size.
pub const MAX_HASHED_TOKENS: usize = 100;

/// Hash the first [`MAX_HASHED_TOKENS`] lower-cased words of `text` into buckets.
///
/// Each token adds `1.0 / token_count` to bucket `md5(token) mod 384`, so the
/// components sum to 1 for non-empty text. Empty or whitespace-only text yields
/// the zero vector. Collisions are expected.
pub fn hash_embedding(text: &str) -> EmbeddingVector {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().take(MAX_HASHED_TOKENS).collect();

    if tokens.is_empty() {
        return EmbeddingVector::zeros();
    }

    let weight = 1.0 / tokens.len() as f32;
    let mut values = vec![0.0f32; EMBEDDING_DIM];
    for token in &tokens {
        values[bucket(token)] += weight;
    }

    EmbeddingVector::from_exact(values)
}

/// Process-independent bucket: first 8 bytes of the MD5 digest, little-endian.
fn bucket(token: &str) -> usize {
    let digest = md5::compute(token.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.0[..8]);
    (u64::from_le_bytes(prefix) % EMBEDDING_DIM as u64) as usize
}
