//! Route definitions for the REST API.

mod embeddings;
mod extract;
mod health;
mod root;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root::root))
        // Health check
        .route("/health", get(health::health_check))
        // Extraction
        .route("/extract-ocr", post(extract::extract_ocr))
        .route("/generate-embeddings", post(embeddings::generate_embeddings))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        // Attach state
        .with_state(state)
}

pub use embeddings::*;
pub use extract::*;
pub use health::*;
pub use root::*;
