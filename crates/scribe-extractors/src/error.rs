//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during content extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Declared file type is not handled by any extractor.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Image decoding or the OCR engine failed on a single image.
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// A document could not be processed; aborts the whole document.
    #[error("{}", document_message(.page, .message))]
    DocumentProcessing {
        /// Zero-based page index, when the failure is tied to one page.
        page: Option<usize>,
        message: String,
        #[source]
        source: Option<Box<ExtractError>>,
    },

    /// The OCR engine or document backend is missing or misconfigured.
    #[error("Extractor configuration error: {0}")]
    Configuration(String),

    /// IO error during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

fn document_message(page: &Option<usize>, message: &str) -> String {
    match page {
        Some(page) => format!("PDF processing failed on page {}: {}", page, message),
        None => format!("PDF processing failed: {}", message),
    }
}

impl ExtractError {
    /// Document-level failure with no page context.
    pub fn document(message: impl Into<String>) -> Self {
        Self::DocumentProcessing {
            page: None,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a failure that happened while processing `page`.
    pub fn on_page(page: usize, err: ExtractError) -> Self {
        Self::DocumentProcessing {
            page: Some(page),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Page index carried by a document failure.
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::DocumentProcessing { page, .. } => *page,
            _ => None,
        }
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
