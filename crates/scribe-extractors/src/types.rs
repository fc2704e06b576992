//! Core types for content extraction.

use serde::{Deserialize, Serialize};

/// Literal placed between page texts when assembling a document's full text.
///
/// A document whose own content contains this literal cannot be split back into
/// its pages unambiguously; that collision is accepted.
pub const PAGE_SEPARATOR: &str = "\n\n--- PAGE BREAK ---\n\n";

/// Format of the uploaded source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Multi-page PDF document.
    Pdf,
    /// Single raster image.
    Image {
        /// Lower-cased file extension (e.g., "png", "tiff").
        format: String,
    },
}

/// How a page's text was obtained. Exactly one method applies per page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PageMethod {
    /// Read from the document's embedded text layer.
    Direct,
    /// Recognized from a rasterized image of the page.
    Ocr {
        /// Mean OCR confidence for the page (0 when nothing usable was recognized).
        confidence: f64,
    },
}

/// One page of an extracted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based position in the source document.
    pub index: usize,
    /// Extracted text, possibly empty.
    pub text: String,
    /// Extraction method used for this page.
    #[serde(flatten)]
    pub method: PageMethod,
}

impl Page {
    /// Page read from the embedded text layer.
    pub fn direct(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            method: PageMethod::Direct,
        }
    }

    /// Page recognized through OCR.
    pub fn scanned(index: usize, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            index,
            text: text.into(),
            method: PageMethod::Ocr { confidence },
        }
    }

    /// Whether the page went through OCR.
    pub fn is_scanned(&self) -> bool {
        matches!(self.method, PageMethod::Ocr { .. })
    }

    /// OCR confidence, present only for scanned pages.
    pub fn ocr_confidence(&self) -> Option<f64> {
        match self.method {
            PageMethod::Ocr { confidence } => Some(confidence),
            PageMethod::Direct => None,
        }
    }
}

/// Raw output of an OCR engine for one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrOutput {
    /// Full transcription as emitted by the engine.
    pub text: String,
    /// Per-token confidences; negative values mark non-text regions.
    pub confidences: Vec<f32>,
}

/// Text recognized from a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageText {
    /// Trimmed transcription.
    pub text: String,
    /// Mean of the positive token confidences, 0 when none passed.
    pub confidence: f64,
}

impl ImageText {
    /// Number of whitespace-delimited words in the transcription.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of characters in the transcription.
    pub fn character_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Text extracted from a whole document, page by page.
///
/// The full text is built once from the pages and every derived figure is
/// computed from it on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDocument {
    format: SourceFormat,
    pages: Vec<Page>,
    full_text: String,
}

impl ExtractedDocument {
    /// Assemble a document from pages in source order.
    pub fn from_pages(format: SourceFormat, pages: Vec<Page>) -> Self {
        let full_text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);

        Self {
            format,
            pages,
            full_text,
        }
    }

    /// Wrap a single image's OCR result as a one-page document.
    pub fn from_image(format: impl Into<String>, image: ImageText) -> Self {
        Self::from_pages(
            SourceFormat::Image {
                format: format.into(),
            },
            vec![Page::scanned(0, image.text, image.confidence)],
        )
    }

    /// Source format.
    pub fn format(&self) -> &SourceFormat {
        &self.format
    }

    /// Pages in source order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Per-page texts in source order.
    pub fn page_texts(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.text.clone()).collect()
    }

    /// Page texts joined with [`PAGE_SEPARATOR`].
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whitespace-delimited token count of the full text.
    pub fn word_count(&self) -> usize {
        self.full_text.split_whitespace().count()
    }

    /// Character count of the full text.
    pub fn character_count(&self) -> usize {
        self.full_text.chars().count()
    }

    /// Mean confidence over OCR pages only; `None` when no page used OCR.
    pub fn average_confidence(&self) -> Option<f64> {
        let confidences: Vec<f64> = self.pages.iter().filter_map(Page::ocr_confidence).collect();
        if confidences.is_empty() {
            return None;
        }
        Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
    }

    /// Number of pages that went through OCR.
    pub fn scanned_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_scanned()).count()
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}
