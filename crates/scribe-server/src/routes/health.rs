//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub ocr_engine: String,
    /// "loaded", "not loaded" or "not available".
    pub embedding_model: String,
    /// "connected" or "not connected".
    pub store: String,
    pub version: String,
}

/// Health check endpoint.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let store = if state.store_connected().await {
        "connected"
    } else {
        "not connected"
    };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        ocr_engine: state.ocr_engine.to_string(),
        embedding_model: state
            .coordinator
            .embeddings()
            .model_state()
            .as_str()
            .to_string(),
        store: store.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
