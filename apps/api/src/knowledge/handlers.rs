use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::MAX_UPLOAD_BYTES;
use crate::models::{Attachment, ProjectExample};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExampleRequest {
    pub title: String,
    pub requirements: String,
    pub budget: String,
    pub timeline: String,
    #[serde(default)]
    pub success_reason: Option<String>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /api/v1/examples — newest first (ids are random, so this is
/// insertion-agnostic but stable; the store itself guarantees no order).
pub async fn handle_list_examples(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectExample>>, AppError> {
    let mut examples = state.store.list_examples().await?;
    examples.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(Json(examples))
}

/// POST /api/v1/examples
///
/// The record is written to the store first; the caller only learns the id
/// once the write is confirmed.
pub async fn handle_create_example(
    State(state): State<AppState>,
    Json(request): Json<CreateExampleRequest>,
) -> Result<(StatusCode, Json<ProjectExample>), AppError> {
    for (field, value) in [
        ("title", &request.title),
        ("requirements", &request.requirements),
        ("budget", &request.budget),
        ("timeline", &request.timeline),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("'{field}' must not be empty")));
        }
    }

    if let Some(attachment) = &request.attachment {
        // Base64 is ~4/3 of the raw size; enforce the same ceiling as the
        // upload path so a hand-built request cannot bypass it.
        if attachment.data.len() > MAX_UPLOAD_BYTES / 3 * 4 + 4 {
            return Err(AppError::PayloadTooLarge(
                "Attachment exceeds the document store size ceiling".to_string(),
            ));
        }
    }

    let example = ProjectExample {
        id: Uuid::new_v4().to_string(),
        title: request.title,
        requirements: request.requirements,
        budget: request.budget,
        timeline: request.timeline,
        success_reason: request.success_reason,
        attachment: request.attachment,
    };

    state.store.save_example(&example).await?;
    Ok((StatusCode::CREATED, Json(example)))
}

/// DELETE /api/v1/examples/:id
pub async fn handle_delete_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_example(&id).await? {
        return Err(AppError::NotFound(format!("Example {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/examples/:id/attachment — decodes the stored base64 back to
/// the original bytes and serves them under the stored MIME type.
pub async fn handle_example_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let examples = state.store.list_examples().await?;
    let attachment = examples
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Example {id} not found")))?
        .attachment
        .ok_or_else(|| AppError::NotFound(format!("Example {id} has no attachment")))?;
    attachment_response(&attachment)
}

/// GET /api/v1/history — newest first by timestamp.
pub async fn handle_list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::models::EstimationHistory>>, AppError> {
    let mut history = state.store.list_history().await?;
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(Json(history))
}

/// GET /api/v1/history/:id/attachment
pub async fn handle_history_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let history = state.store.list_history().await?;
    let attachment = history
        .into_iter()
        .find(|h| h.id == id)
        .ok_or_else(|| AppError::NotFound(format!("History entry {id} not found")))?
        .attachment
        .ok_or_else(|| AppError::NotFound(format!("History entry {id} has no attachment")))?;
    attachment_response(&attachment)
}

/// POST /api/v1/admin/clear
///
/// Destructive wipe of both collections; refused without `confirm: true`.
pub async fn handle_clear_all(
    State(state): State<AppState>,
    Json(request): Json<ClearRequest>,
) -> Result<StatusCode, AppError> {
    if !request.confirm {
        return Err(AppError::Validation(
            "Clearing all data requires explicit confirmation".to_string(),
        ));
    }
    state.store.clear_all().await?;
    tracing::info!("Cleared knowledge base and estimation history");
    Ok(StatusCode::NO_CONTENT)
}

fn attachment_response(attachment: &Attachment) -> Result<Response, AppError> {
    let bytes = BASE64_STANDARD
        .decode(&attachment.data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored attachment is corrupt: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, attachment.mime_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", attachment.name),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use base64::prelude::{Engine as _, BASE64_STANDARD};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::models::{Attachment, ProjectExample};
    use crate::store::memory::MemoryStore;
    use crate::store::DocumentStore;
    use crate::test_support::{body_json, test_router};

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list_round_trips_all_fields() {
        let store = Arc::new(MemoryStore::new());
        let app = test_router(store.clone(), "http://unused.invalid");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/examples",
                json!({
                    "title": "Fitness tracker",
                    "requirements": "Workout logging and charts",
                    "budget": "$2,200",
                    "timeline": "4 weeks",
                    "attachment": { "name": "ref.png", "mimeType": "image/png", "data": "aW1n" }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;

        let response = app.oneshot(get("/api/v1/examples")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], created["id"]);
        assert_eq!(listed[0]["title"], "Fitness tracker");
        assert_eq!(listed[0]["budget"], "$2,200");
        assert_eq!(listed[0]["attachment"]["mimeType"], "image/png");
    }

    #[tokio::test]
    async fn test_create_with_blank_field_rejected_and_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let app = test_router(store.clone(), "http://unused.invalid");

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/examples",
                json!({
                    "title": " ",
                    "requirements": "r",
                    "budget": "$1",
                    "timeline": "1 day"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.list_examples().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_example_returns_not_found() {
        let app = test_router(Arc::new(MemoryStore::new()), "http://unused.invalid");
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/examples/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attachment_round_trips_bytes_exactly() {
        // Arbitrary non-UTF8 binary; fidelity must not depend on MIME type.
        let raw: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        let store = Arc::new(MemoryStore::with_examples(vec![ProjectExample {
            id: "ex1".to_string(),
            title: "Binary test".to_string(),
            requirements: "n/a".to_string(),
            budget: "$1".to_string(),
            timeline: "1 day".to_string(),
            success_reason: None,
            attachment: Some(Attachment {
                name: "blob.bin".to_string(),
                mime_type: "application/pdf".to_string(),
                data: BASE64_STANDARD.encode(&raw),
            }),
        }]));
        let app = test_router(store, "http://unused.invalid");

        let response = app
            .oneshot(get("/api/v1/examples/ex1/attachment"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), raw.as_slice());
    }

    #[tokio::test]
    async fn test_clear_without_confirmation_leaves_collections_untouched() {
        let store = Arc::new(MemoryStore::with_examples(vec![ProjectExample {
            id: "keep".to_string(),
            title: "Keep me".to_string(),
            requirements: "r".to_string(),
            budget: "$1".to_string(),
            timeline: "1 day".to_string(),
            success_reason: None,
            attachment: None,
        }]));
        let app = test_router(store.clone(), "http://unused.invalid");

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/admin/clear", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.list_examples().await.unwrap().len(), 1);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/admin/clear",
                json!({ "confirm": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(store.list_examples().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_listed_newest_first() {
        use crate::models::{EstimationHistory, EstimationResult};

        let store = Arc::new(MemoryStore::new());
        for (id, ts) in [("h1", 100), ("h2", 300), ("h3", 200)] {
            store
                .save_history(&EstimationHistory {
                    id: id.to_string(),
                    project_name: format!("{id}..."),
                    timestamp: ts,
                    result: EstimationResult::parse_failure(),
                    config: None,
                    attachment: None,
                })
                .await
                .unwrap();
        }
        let app = test_router(store, "http://unused.invalid");

        let response = app.oneshot(get("/api/v1/history")).await.unwrap();
        let listed = body_json(response).await;
        let ids: Vec<_> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["h2", "h3", "h1"]);
    }
}
