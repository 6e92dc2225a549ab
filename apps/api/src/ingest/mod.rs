//! Document ingestion — turns an uploaded PDF or image into a best-effort
//! structured extraction via the LLM. This boundary never raises: any
//! failure collapses into a fallback extraction the user can overwrite
//! manually. The only hard rejections happen before the network call
//! (unsupported MIME type, oversized file).

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::AppError;
use crate::llm_client::{GeminiClient, LlmError, Part};
use crate::models::Attachment;

use self::prompts::{
    extraction_schema, extraction_system_instruction, EXTRACTION_MODEL, EXTRACTION_USER_PROMPT,
};

/// Raw upload cap. The store rejects documents over ~1MB and base64
/// inflates the payload by ~33%, so 750KB raw is the safe maximum.
pub const MAX_UPLOAD_BYTES: usize = 750 * 1024;

/// Substituted when the model answered but the payload was not valid
/// against the extraction schema.
pub const FALLBACK_UNPARSEABLE: &str = "Could not extract requirements automatically.";

/// Substituted when the call itself failed (transport or API error).
pub const FALLBACK_CALL_FAILED: &str = "Analysis failed. Please enter manually.";

/// Best-effort extraction of project fields from an uploaded document.
/// `requirements` is always populated, a fallback string at worst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub requirements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<String>>,
}

impl ExtractedProject {
    fn fallback(requirements: &str) -> Self {
        ExtractedProject {
            title: None,
            requirements: requirements.to_string(),
            budget: None,
            timeline: None,
            project_scope: None,
            phases: None,
        }
    }
}

/// Uploads are limited to what the vision model accepts.
pub fn is_supported_mime(mime_type: &str) -> bool {
    mime_type == "application/pdf" || mime_type.starts_with("image/")
}

/// Enforced before encoding and before any network call is made.
pub fn ensure_within_upload_cap(raw_len: usize) -> Result<(), AppError> {
    if raw_len > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "File too large for the document store (max {}KB). Use a smaller PDF or a screenshot.",
            MAX_UPLOAD_BYTES / 1024
        )));
    }
    Ok(())
}

/// Runs one extraction call against the already-encoded upload. Errors are
/// logged and converted into fallback extractions; the caller decides
/// whether to persist anything.
pub async fn extract_project(
    llm: &GeminiClient,
    attachment: &Attachment,
) -> ExtractedProject {
    let parts = [
        Part::inline_data(attachment.mime_type.clone(), attachment.data.clone()),
        Part::text(EXTRACTION_USER_PROMPT),
    ];

    match llm
        .generate_json::<ExtractedProject>(
            EXTRACTION_MODEL,
            &parts,
            &extraction_system_instruction(),
            None,
            extraction_schema(),
        )
        .await
    {
        Ok(extracted) => extracted,
        Err(e @ (LlmError::Parse(_) | LlmError::EmptyContent)) => {
            warn!("Document extraction returned an unusable payload: {e}");
            ExtractedProject::fallback(FALLBACK_UNPARSEABLE)
        }
        Err(e) => {
            error!("Document extraction call failed: {e}");
            ExtractedProject::fallback(FALLBACK_CALL_FAILED)
        }
    }
}
