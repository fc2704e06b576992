//! Request, response, and stored record types for one extraction.

use chrono::{DateTime, Utc};
use scribe_extractors::ExtractedDocument;
use serde::Serialize;

use super::embedding::EmbeddingVector;
use crate::error::{ScribeError, ScribeResult};

/// Opaque label map passed through from the caller.
pub type Labels = serde_json::Map<String, serde_json::Value>;

/// One uploaded file to extract.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Raw file bytes.
    pub content: Vec<u8>,
    /// Declared filename; only its extension is used, to pick the extractor.
    pub filename: String,
    /// Caller's identifier for the file, echoed back and used as the store key.
    pub correlation_id: Option<String>,
    /// Serialized JSON label map, passed through unvalidated.
    pub labels: Option<String>,
}

impl ExtractionRequest {
    /// Create a request for `content` declared as `filename`.
    pub fn new(content: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
            correlation_id: None,
            labels: None,
        }
    }

    /// Set the correlation identifier.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Set the serialized label map.
    pub fn with_labels(mut self, labels: impl Into<String>) -> Self {
        self.labels = Some(labels.into());
        self
    }
}

/// Parse a serialized label map.
///
/// Blank input is an empty map; anything that is not a JSON object is an error.
pub fn parse_labels(raw: &str) -> ScribeResult<Labels> {
    if raw.trim().is_empty() {
        return Ok(Labels::new());
    }

    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(ScribeError::validation(format!(
            "labels must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Figures derived from an extracted document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub page_count: usize,
    pub word_count: usize,
    pub character_count: usize,
    /// Mean confidence over OCR pages; null when no page went through OCR.
    pub average_confidence: Option<f64>,
}

impl From<&ExtractedDocument> for ResponseMetadata {
    fn from(document: &ExtractedDocument) -> Self {
        Self {
            page_count: document.page_count(),
            word_count: document.word_count(),
            character_count: document.character_count(),
            average_confidence: document.average_confidence(),
        }
    }
}

/// Result payload for one extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub success: bool,
    pub correlation_id: Option<String>,
    /// Page texts joined with the page separator.
    pub text: String,
    /// Page texts in source order.
    pub pages: Vec<String>,
    pub embeddings: EmbeddingVector,
    pub metadata: ResponseMetadata,
    pub labels: Labels,
}

/// What the document store keeps for one correlation identifier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredExtraction {
    pub correlation_id: String,
    pub text: String,
    pub embeddings: EmbeddingVector,
    pub metadata: ResponseMetadata,
    pub extracted_at: DateTime<Utc>,
}

impl StoredExtraction {
    /// Record for `response`, keyed by `correlation_id`.
    pub fn from_response(correlation_id: impl Into<String>, response: &ExtractionResponse) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            text: response.text.clone(),
            embeddings: response.embeddings.clone(),
            metadata: response.metadata.clone(),
            extracted_at: Utc::now(),
        }
    }
}
