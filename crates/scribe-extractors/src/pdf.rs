//! PDF content extraction with per-page OCR fallback.
//!
//! Each page is read from its embedded text layer first. Pages whose text layer
//! is too short to be genuine content (scans, image-only pages that yield only
//! header/footer noise) are rasterized and run through OCR instead. Pages are
//! processed strictly in order and any page failure aborts the document.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use image::ImageFormat;
use tracing::debug;

use crate::backend::{DocumentBackend, PageSource};
use crate::error::{ExtractError, ExtractResult};
use crate::image::ImageTextExtractor;
use crate::types::{ExtractedDocument, Page, SourceFormat};
use crate::Extractor;

/// Trimmed direct text must be longer than this to skip OCR.
pub const DEFAULT_MIN_DIRECT_TEXT_CHARS: usize = 50;

/// Linear scale applied when rasterizing a page for OCR (2x = 4x pixel area).
pub const DEFAULT_RASTER_SCALE: f32 = 2.0;

/// Tuning for document extraction.
#[derive(Debug, Clone)]
pub struct DocumentExtractionConfig {
    /// Pages whose trimmed direct text has at most this many characters go to OCR.
    pub min_direct_text_chars: usize,
    /// Rasterization scale for scanned pages.
    pub raster_scale: f32,
    /// Directory under which per-call scratch directories are created
    /// (system temp dir when unset).
    pub scratch_dir: Option<PathBuf>,
}

impl Default for DocumentExtractionConfig {
    fn default() -> Self {
        Self {
            min_direct_text_chars: DEFAULT_MIN_DIRECT_TEXT_CHARS,
            raster_scale: DEFAULT_RASTER_SCALE,
            scratch_dir: None,
        }
    }
}

/// Multi-page document extractor.
#[derive(Clone)]
pub struct DocumentTextExtractor {
    backend: Arc<dyn DocumentBackend>,
    image: ImageTextExtractor,
    config: DocumentExtractionConfig,
}

impl DocumentTextExtractor {
    /// Create an extractor with default thresholds.
    pub fn new(backend: Arc<dyn DocumentBackend>, image: ImageTextExtractor) -> Self {
        Self::with_config(backend, image, DocumentExtractionConfig::default())
    }

    /// Create an extractor with custom thresholds.
    pub fn with_config(
        backend: Arc<dyn DocumentBackend>,
        image: ImageTextExtractor,
        config: DocumentExtractionConfig,
    ) -> Self {
        Self {
            backend,
            image,
            config,
        }
    }

    pub fn config(&self) -> &DocumentExtractionConfig {
        &self.config
    }

    /// Extract every page synchronously (called within spawn_blocking).
    pub fn extract_sync(&self, content: &[u8]) -> ExtractResult<ExtractedDocument> {
        let source = self.backend.open(content)?;
        let page_count = source.page_count();

        // Removed on drop, whichever way this function returns.
        let scratch = self.scratch_dir()?;

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let page = self
                .extract_page(source.as_ref(), index, scratch.path())
                .map_err(|e| ExtractError::on_page(index, e))?;
            pages.push(page);
        }

        let document = ExtractedDocument::from_pages(SourceFormat::Pdf, pages);
        debug!(
            backend = self.backend.name(),
            pages = page_count,
            scanned = document.scanned_pages(),
            "Document extracted"
        );
        Ok(document)
    }

    fn extract_page(
        &self,
        source: &dyn PageSource,
        index: usize,
        scratch: &std::path::Path,
    ) -> ExtractResult<Page> {
        let direct = source.direct_text(index)?;
        if direct.trim().chars().count() > self.config.min_direct_text_chars {
            return Ok(Page::direct(index, direct));
        }

        let raster = source.render(index, self.config.raster_scale)?;
        let path = scratch.join(format!("page_{}.png", index));
        raster
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| ExtractError::document(format!("Failed to write page image: {}", e)))?;
        let encoded = std::fs::read(&path)?;

        let recognized = self.image.extract_text(&encoded)?;
        debug!(
            page = index,
            confidence = recognized.confidence,
            "Page sent through OCR"
        );
        Ok(Page::scanned(index, recognized.text, recognized.confidence))
    }

    fn scratch_dir(&self) -> ExtractResult<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("scribe-pages-");
        let dir = match &self.config.scratch_dir {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

#[async_trait]
impl Extractor for DocumentTextExtractor {
    async fn extract(&self, content: &[u8], _filename: &str) -> ExtractResult<ExtractedDocument> {
        let content = content.to_vec();
        let extractor = self.clone();

        tokio::task::spawn_blocking(move || extractor.extract_sync(&content)).await?
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }
}
