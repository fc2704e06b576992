//! Error handling for the REST API server.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

use scribe_core::error::ScribeError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT", message)
    }

    pub fn ocr_failure(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "OCR_FAILURE", message)
    }

    pub fn document_processing(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "DOCUMENT_PROCESSING_FAILURE",
            message,
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from scribe-core errors
impl From<ScribeError> for ApiError {
    fn from(err: ScribeError) -> Self {
        let mut details = serde_json::Map::new();
        details.insert("errorCode".to_string(), json!(err.code().as_str()));
        if let Some(suggestion) = err.suggestion() {
            details.insert("suggestion".to_string(), json!(suggestion));
        }
        if let Some(page) = err.page() {
            details.insert("page".to_string(), json!(page));
        }

        let message = err.to_string();
        let api_error = match err {
            ScribeError::Validation { .. } => ApiError::validation(message),
            ScribeError::UnsupportedFormat { .. } => ApiError::unsupported_format(message),
            ScribeError::Ocr { .. } => ApiError::ocr_failure(message),
            ScribeError::DocumentProcessing { .. } => ApiError::document_processing(message),
            ScribeError::Persistence { .. } => {
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_FAILURE",
                    message,
                )
            }
            ScribeError::Embedding { .. } => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "EMBEDDING_ERROR", message)
            }
            ScribeError::Configuration(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                message,
            ),
            ScribeError::Io(_) | ScribeError::Serialization(_) | ScribeError::Internal(_) => {
                ApiError::internal(message)
            }
        };

        api_error.with_details(serde_json::Value::Object(details))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), "BAD_REQUEST", err.body_text())
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
