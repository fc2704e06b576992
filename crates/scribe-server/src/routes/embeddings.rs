//! Text embedding endpoint.

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};

use scribe_core::types::EmbeddingVector;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateEmbeddingsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateEmbeddingsResponse {
    pub success: bool,
    pub embeddings: EmbeddingVector,
    pub dimension: usize,
}

/// Embed free text with the same generator used for uploads.
/// POST /generate-embeddings
pub async fn generate_embeddings(
    State(state): State<AppState>,
    Form(request): Form<GenerateEmbeddingsRequest>,
) -> Json<GenerateEmbeddingsResponse> {
    let embeddings = state.coordinator.embeddings().embed(&request.text).await;
    let dimension = embeddings.len();

    Json(GenerateEmbeddingsResponse {
        success: true,
        embeddings,
        dimension,
    })
}
