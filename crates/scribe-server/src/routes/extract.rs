//! Upload extraction endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};

use scribe_core::types::{ExtractionRequest, ExtractionResponse};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Fields of an `/extract-ocr` form.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(Option<String>, Vec<u8>)>,
    file_id: Option<String>,
    labels: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let filename = field.file_name().map(str::to_string);
                    let content = field.bytes().await?;
                    form.file = Some((filename, content.to_vec()));
                }
                Some("file_id") => form.file_id = Some(field.text().await?),
                Some("labels") => form.labels = Some(field.text().await?),
                _ => {}
            }
        }

        Ok(form)
    }

    fn into_request(self) -> ApiResult<ExtractionRequest> {
        let (filename, content) = self
            .file
            .ok_or_else(|| ApiError::bad_request("Missing 'file' field"))?;
        let filename = filename
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::bad_request("No filename provided"))?;

        let mut request = ExtractionRequest::new(content, filename);
        if let Some(id) = self.file_id.filter(|id| !id.trim().is_empty()) {
            request = request.with_correlation_id(id.trim());
        }
        if let Some(labels) = self.labels {
            request = request.with_labels(labels);
        }
        Ok(request)
    }
}

/// Extract text and embeddings from an uploaded PDF or image.
/// POST /extract-ocr
///
/// Multipart fields: `file` (required), `file_id` and `labels` (optional).
pub async fn extract_ocr(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<ExtractionResponse>> {
    let request = UploadForm::read(multipart).await?.into_request()?;
    let response = state.coordinator.process(request).await?;
    Ok(Json(response))
}
