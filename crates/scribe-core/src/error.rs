//! Error types for scribe operations.
//!
//! Every failure carries a stable [`ErrorCode`] so boundary adapters can map
//! it without string matching, plus an optional suggestion for resolution.

use scribe_extractors::ExtractError;
use thiserror::Error;

/// Result type alias for scribe operations.
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Main error type for all scribe operations.
#[derive(Error, Debug)]
pub enum ScribeError {
    /// Request input is malformed.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// Declared file type has no extractor; nothing was processed.
    #[error("Unsupported file type: {extension}")]
    UnsupportedFormat { extension: String, code: ErrorCode },

    /// OCR failed on a single image.
    #[error("OCR failed: {message}")]
    Ocr {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A document could not be processed; no partial result exists.
    #[error("{message}")]
    DocumentProcessing {
        message: String,
        code: ErrorCode,
        /// Zero-based index of the failing page, when known.
        page: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Document store operation failed.
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding model failed to load or encode.
    #[error("Embedding error: {message}")]
    Embedding {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidInput,
    ValUnsupportedFormat,

    // Extraction (EXT_xxx)
    ExtOcrFailed,
    ExtDocumentFailed,
    ExtPageFailed,

    // Embedding (EMB_xxx)
    EmbLoadFailed,
    EmbGenerationFailed,
    EmbDimensionMismatch,

    // Store (STO_xxx)
    StoConnectionFailed,
    StoOperationFailed,

    // Configuration (CFG_xxx)
    CfgInvalid,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValUnsupportedFormat => "VAL_002",
            ErrorCode::ExtOcrFailed => "EXT_001",
            ErrorCode::ExtDocumentFailed => "EXT_002",
            ErrorCode::ExtPageFailed => "EXT_003",
            ErrorCode::EmbLoadFailed => "EMB_001",
            ErrorCode::EmbGenerationFailed => "EMB_002",
            ErrorCode::EmbDimensionMismatch => "EMB_003",
            ErrorCode::StoConnectionFailed => "STO_001",
            ErrorCode::StoOperationFailed => "STO_002",
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl ScribeError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
            code: ErrorCode::ValUnsupportedFormat,
        }
    }

    /// Create an OCR error.
    pub fn ocr(message: impl Into<String>) -> Self {
        Self::Ocr {
            message: message.into(),
            code: ErrorCode::ExtOcrFailed,
            source: None,
        }
    }

    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            code: ErrorCode::StoOperationFailed,
            source: None,
        }
    }

    /// Create a persistence error for a store that cannot be reached.
    pub fn store_connection(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            code: ErrorCode::StoConnectionFailed,
            source: None,
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
            code: ErrorCode::EmbGenerationFailed,
            source: None,
        }
    }

    /// Create an embedding error raised while loading a model.
    pub fn embedding_load(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
            code: ErrorCode::EmbLoadFailed,
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::UnsupportedFormat { code, .. } => *code,
            Self::Ocr { code, .. } => *code,
            Self::DocumentProcessing { code, .. } => *code,
            Self::Persistence { code, .. } => *code,
            Self::Embedding { code, .. } => *code,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            _ => ErrorCode::Internal,
        }
    }

    /// Page index carried by a document failure.
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::DocumentProcessing { page, .. } => *page,
            _ => None,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFormat { .. } => {
                Some("Upload a PDF or a PNG, JPG, JPEG, TIFF or BMP image")
            }
            Self::Ocr { .. } => Some("Check that the image is readable and not corrupted"),
            Self::DocumentProcessing { .. } => Some("Check that the PDF opens in a viewer"),
            Self::Persistence { .. } => {
                Some("Please check your document store connection settings")
            }
            Self::Embedding { .. } => Some("Please check your embedding provider configuration"),
            _ => None,
        }
    }
}

impl From<ExtractError> for ScribeError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(extension) => Self::unsupported_format(extension),
            ExtractError::Ocr(message) => Self::Ocr {
                message,
                code: ErrorCode::ExtOcrFailed,
                source: None,
            },
            ExtractError::DocumentProcessing { page, .. } => Self::DocumentProcessing {
                message: err.to_string(),
                code: if page.is_some() {
                    ErrorCode::ExtPageFailed
                } else {
                    ErrorCode::ExtDocumentFailed
                },
                page,
                source: Some(Box::new(err)),
            },
            ExtractError::Configuration(message) => Self::Configuration(message),
            ExtractError::Io(e) => Self::Io(e),
            ExtractError::TaskJoin(e) => Self::Internal(format!("Extraction task failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_error() {
        let err = ScribeError::unsupported_format(".docx");
        assert_eq!(err.code(), ErrorCode::ValUnsupportedFormat);
        assert_eq!(err.to_string(), "Unsupported file type: .docx");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_from_page_failure_keeps_index() {
        let page_err = ExtractError::on_page(4, ExtractError::Ocr("engine crashed".to_string()));
        let err = ScribeError::from(page_err);

        assert_eq!(err.code(), ErrorCode::ExtPageFailed);
        assert_eq!(err.page(), Some(4));
        assert!(err.to_string().contains("page 4"));
        assert!(err.to_string().contains("engine crashed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_unreadable_document() {
        let err = ScribeError::from(ExtractError::document("not a PDF"));
        assert_eq!(err.code(), ErrorCode::ExtDocumentFailed);
        assert_eq!(err.page(), None);
    }

    #[test]
    fn test_from_ocr_error() {
        let err = ScribeError::from(ExtractError::Ocr("bad pixels".to_string()));
        assert_eq!(err.code(), ErrorCode::ExtOcrFailed);
        assert_eq!(err.to_string(), "OCR failed: bad pixels");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::ValUnsupportedFormat.as_str(), "VAL_002");
        assert_eq!(ErrorCode::StoOperationFailed.as_str(), "STO_002");
        assert_eq!(ErrorCode::Internal.as_str(), "INT_001");
    }
}
