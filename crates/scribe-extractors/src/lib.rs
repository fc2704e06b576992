//! scribe-extractors - Page-aware text extraction for documents and images.
//!
//! PDFs are read page by page: pages with a usable embedded text layer keep it,
//! the rest are rasterized and run through OCR. Raster images go straight to
//! OCR and come back as one-page documents.
//!
//! # Features
//!
//! - `pdfium` (default) - PDF text layers and rasterization via PDFium
//! - `tesseract` (default) - OCR via the Tesseract CLI (must be installed)
//!
//! # Example
//!
//! ```ignore
//! use scribe_extractors::{DocumentExtractionConfig, ExtractorFactory};
//!
//! let pipeline = ExtractorFactory::default_pipeline(None, DocumentExtractionConfig::default())?;
//! let document = pipeline.extract(&pdf_bytes, "lecture-notes.pdf").await?;
//! println!("{} pages, {} words", document.page_count(), document.word_count());
//! ```

mod backend;
mod error;
mod factory;
mod image;
mod ocr;
mod pdf;
mod pipeline;
mod types;

pub use backend::{DocumentBackend, PageSource};
pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use image::{mean_confidence, ImageTextExtractor, IMAGE_EXTENSIONS};
pub use ocr::OcrEngine;
pub use pdf::{
    DocumentExtractionConfig, DocumentTextExtractor, DEFAULT_MIN_DIRECT_TEXT_CHARS,
    DEFAULT_RASTER_SCALE,
};
pub use pipeline::ExtractionPipeline;
pub use types::{
    ExtractedDocument, ImageText, OcrOutput, Page, PageMethod, SourceFormat, PAGE_SEPARATOR,
};

#[cfg(feature = "pdfium")]
pub use backend::PdfiumBackend;

#[cfg(feature = "tesseract")]
pub use ocr::TesseractEngine;

use async_trait::async_trait;

/// Core Extractor trait - every upload format is served by one implementation.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text from the uploaded bytes; `filename` is the declared name.
    async fn extract(&self, content: &[u8], filename: &str) -> ExtractResult<ExtractedDocument>;

    /// Lower-case file extensions (without the dot) handled by this extractor.
    fn supported_extensions(&self) -> &[&str];

    /// Check if this extractor handles the given extension (case-insensitive).
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
