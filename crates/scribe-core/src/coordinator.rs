//! Extraction coordinator - one upload in, one result payload out.

use std::sync::Arc;

use scribe_extractors::ExtractionPipeline;

use crate::embedding::EmbeddingGenerator;
use crate::error::ScribeResult;
use crate::traits::DocumentStore;
use crate::types::{
    parse_labels, ExtractionRequest, ExtractionResponse, Labels, ResponseMetadata,
    StoredExtraction,
};

/// Runs extraction, embedding and (optional) persistence for one request.
pub struct ExtractionCoordinator {
    pipeline: ExtractionPipeline,
    embeddings: EmbeddingGenerator,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ExtractionCoordinator {
    /// Create a coordinator without persistence.
    pub fn new(pipeline: ExtractionPipeline, embeddings: EmbeddingGenerator) -> Self {
        Self {
            pipeline,
            embeddings,
            store: None,
        }
    }

    /// Persist results of requests that carry a correlation identifier.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The embedding generator shared with text-only callers.
    pub fn embeddings(&self) -> &EmbeddingGenerator {
        &self.embeddings
    }

    /// The configured document store, if any.
    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.store.as_ref()
    }

    /// Whether `filename` would be accepted by [`process`](Self::process).
    pub fn supports(&self, filename: &str) -> bool {
        self.pipeline.supports(filename)
    }

    /// Extract, embed, and optionally persist one upload.
    ///
    /// Unsupported file types fail before any processing. Label and
    /// persistence problems are logged and never fail the request.
    pub async fn process(&self, request: ExtractionRequest) -> ScribeResult<ExtractionResponse> {
        let extractor = self.pipeline.route(&request.filename)?;
        let labels = labels_or_empty(request.labels.as_deref());

        tracing::debug!(
            filename = %request.filename,
            extractor = extractor.name(),
            bytes = request.content.len(),
            "Extracting upload"
        );
        let document = extractor
            .extract(&request.content, &request.filename)
            .await?;

        let embeddings = self.embeddings.embed(document.full_text()).await;

        let response = ExtractionResponse {
            success: true,
            correlation_id: request.correlation_id,
            text: document.full_text().to_string(),
            pages: document.page_texts(),
            embeddings,
            metadata: ResponseMetadata::from(&document),
            labels,
        };

        self.persist(&response).await;

        tracing::info!(
            filename = %request.filename,
            pages = response.metadata.page_count,
            words = response.metadata.word_count,
            scanned = document.scanned_pages(),
            "Extraction complete"
        );
        Ok(response)
    }

    async fn persist(&self, response: &ExtractionResponse) {
        let (Some(store), Some(id)) = (&self.store, &response.correlation_id) else {
            return;
        };

        let record = StoredExtraction::from_response(id.clone(), response);
        match store.upsert(&record).await {
            Ok(()) => tracing::debug!(store = store.name(), id = %id, "Stored extraction"),
            Err(e) => tracing::warn!(
                "Failed to store extraction '{}' in {}: {}",
                id,
                store.name(),
                e
            ),
        }
    }
}

fn labels_or_empty(raw: Option<&str>) -> Labels {
    let Some(raw) = raw else {
        return Labels::new();
    };

    parse_labels(raw).unwrap_or_else(|e| {
        tracing::warn!("Could not parse labels, ignoring them: {}", e);
        Labels::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_or_empty() {
        assert!(labels_or_empty(None).is_empty());
        assert!(labels_or_empty(Some("not json")).is_empty());
        assert!(labels_or_empty(Some("42")).is_empty());
        assert_eq!(
            labels_or_empty(Some(r#"{"topic":"optics"}"#))["topic"],
            "optics"
        );
    }
}
