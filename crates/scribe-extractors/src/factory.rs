//! Factory for creating extractors.

use std::path::Path;
use std::sync::Arc;

use crate::backend::DocumentBackend;
use crate::error::ExtractResult;
use crate::image::ImageTextExtractor;
use crate::ocr::OcrEngine;
use crate::pdf::{DocumentExtractionConfig, DocumentTextExtractor};
use crate::pipeline::ExtractionPipeline;

#[cfg(feature = "pdfium")]
use crate::backend::PdfiumBackend;

#[cfg(feature = "tesseract")]
use crate::ocr::TesseractEngine;

/// Factory for creating content extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Pipeline serving PDFs and raster images from the given collaborators.
    pub fn pipeline(
        backend: Arc<dyn DocumentBackend>,
        engine: Arc<dyn OcrEngine>,
        config: DocumentExtractionConfig,
    ) -> ExtractionPipeline {
        let image = ImageTextExtractor::new(engine);
        let pdf = DocumentTextExtractor::with_config(backend, image.clone(), config);

        ExtractionPipeline::new()
            .add_extractor(Arc::new(pdf))
            .add_extractor(Arc::new(image))
    }

    /// Create the Tesseract OCR engine; fails when Tesseract is not installed.
    #[cfg(feature = "tesseract")]
    pub fn tesseract() -> ExtractResult<Arc<TesseractEngine>> {
        Ok(Arc::new(TesseractEngine::new()?))
    }

    /// Bind PDFium, from `library_dir` when given, otherwise from the system.
    #[cfg(feature = "pdfium")]
    pub fn pdfium(library_dir: Option<&Path>) -> ExtractResult<Arc<PdfiumBackend>> {
        let backend = match library_dir {
            Some(dir) => PdfiumBackend::from_dir(dir)?,
            None => PdfiumBackend::new()?,
        };
        Ok(Arc::new(backend))
    }

    /// Pipeline backed by PDFium and Tesseract.
    #[cfg(all(feature = "pdfium", feature = "tesseract"))]
    pub fn default_pipeline(
        library_dir: Option<&Path>,
        config: DocumentExtractionConfig,
    ) -> ExtractResult<ExtractionPipeline> {
        let engine = Self::tesseract()?;
        let backend = Self::pdfium(library_dir)?;
        Ok(Self::pipeline(backend, engine, config))
    }
}
