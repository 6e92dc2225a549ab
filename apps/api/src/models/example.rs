use serde::{Deserialize, Serialize};

/// A file carried alongside a record, stored inline as base64.
///
/// The raw file is capped at 750KB before encoding (see `ingest`), which
/// keeps the encoded document under the store's per-document ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    /// Base64-encoded file contents (standard alphabet, padded).
    pub data: String,
}

/// A past successful project in the knowledge base.
///
/// Immutable once created except for deletion. Documents are stored as
/// plain JSON; optional fields are omitted entirely rather than written
/// as null so the stored shape stays minimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExample {
    pub id: String,
    pub title: String,
    pub requirements: String,
    pub budget: String,
    pub timeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}
