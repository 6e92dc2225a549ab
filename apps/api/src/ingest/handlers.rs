use axum::extract::{Multipart, State};
use axum::Json;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::Serialize;

use crate::errors::AppError;
use crate::ingest::{ensure_within_upload_cap, extract_project, is_supported_mime, ExtractedProject};
use crate::models::Attachment;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub extracted: ExtractedProject,
    /// The encoded upload, handed back so the client can attach it to the
    /// example or estimation it builds from the extraction.
    pub attachment: Attachment,
}

/// POST /api/v1/ingest (multipart, single `file` field)
///
/// Rejections (unsupported type, oversized) happen before the file is
/// encoded or any LLM call is issued. Extraction failures do not surface
/// here; the response then carries the fallback requirements text.
pub async fn handle_ingest(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>, AppError> {
    let mut upload: Option<(String, String, bytes::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("upload").to_string();
            let mime_type = field
                .content_type()
                .ok_or_else(|| {
                    AppError::Validation("File part must declare a content type".to_string())
                })?
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((name, mime_type, data));
        }
    }

    let (name, mime_type, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    if !is_supported_mime(&mime_type) {
        return Err(AppError::Validation(
            "Only image and PDF uploads are supported".to_string(),
        ));
    }
    ensure_within_upload_cap(data.len())?;

    let attachment = Attachment {
        name,
        mime_type,
        data: BASE64_STANDARD.encode(&data),
    };
    let extracted = extract_project(&state.llm, &attachment).await;

    Ok(Json(IngestResponse {
        extracted,
        attachment,
    }))
}
