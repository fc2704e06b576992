//! Server state management.

use std::sync::Arc;

use scribe_core::coordinator::ExtractionCoordinator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<ExtractionCoordinator>,
    /// OCR engine description reported by `/health`.
    pub ocr_engine: Arc<str>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(coordinator: ExtractionCoordinator, ocr_engine: impl Into<String>) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            ocr_engine: Arc::from(ocr_engine.into()),
        }
    }

    /// Whether a document store is configured and answers a ping.
    pub async fn store_connected(&self) -> bool {
        match self.coordinator.store() {
            Some(store) => match store.ping().await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Document store {} is unreachable: {}", store.name(), e);
                    false
                }
            },
            None => false,
        }
    }
}
