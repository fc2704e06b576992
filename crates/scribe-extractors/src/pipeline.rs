//! Extraction pipeline routing uploads to extractors by file extension.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::image::extension_of;
use crate::types::ExtractedDocument;
use crate::Extractor;

/// Pipeline for extracting content using registered extractors.
///
/// Routing uses the declared filename's extension only (case-insensitive);
/// the content itself is never sniffed.
#[derive(Clone)]
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Add an extractor to the pipeline.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Pick the extractor for `filename` without touching any content.
    pub fn route(&self, filename: &str) -> ExtractResult<Arc<dyn Extractor>> {
        let extension = extension_of(filename).unwrap_or_default();

        self.extractors
            .iter()
            .find(|e| !extension.is_empty() && e.supports(&extension))
            .cloned()
            .ok_or_else(|| ExtractError::UnsupportedFormat(display_extension(&extension)))
    }

    /// Extract content using the extractor registered for the file's extension.
    pub async fn extract(
        &self,
        content: &[u8],
        filename: &str,
    ) -> ExtractResult<ExtractedDocument> {
        let extractor = self.route(filename)?;
        extractor.extract(content, filename).await
    }

    /// Check if pipeline can handle a given filename.
    pub fn supports(&self, filename: &str) -> bool {
        self.route(filename).is_ok()
    }

    /// List all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.extractors
            .iter()
            .flat_map(|e| e.supported_extensions().iter().copied())
            .collect()
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{}", extension)
    }
}
