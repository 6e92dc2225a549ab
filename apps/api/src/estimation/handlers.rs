use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::estimation::generate_estimation;
use crate::models::{Attachment, EstimationConfig, EstimationHistory};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub requirements: String,
    #[serde(default)]
    pub config: EstimationConfig,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// Releases the single-estimation gate when the request finishes, whether
/// it succeeded or bailed early.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
            .then(|| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// POST /api/v1/estimate
///
/// Success means the estimation ran AND its history record was persisted;
/// the response is that record. On any failure nothing is written and no
/// partial result is returned.
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimationHistory>, AppError> {
    let requirements = request.requirements.trim();
    if requirements.is_empty() {
        return Err(AppError::Validation(
            "Requirements must not be empty".to_string(),
        ));
    }

    let _guard = InFlightGuard::acquire(&state.estimation_in_flight).ok_or_else(|| {
        AppError::Conflict("An estimation is already in progress".to_string())
    })?;

    let mut examples = state.store.list_examples().await?;
    examples.sort_by(|a, b| b.id.cmp(&a.id));

    let result = generate_estimation(&state.llm, requirements, &examples, &request.config)
        .await
        .map_err(|e| AppError::Llm(format!("Estimation failed: {e}")))?;

    let entry = EstimationHistory {
        id: Uuid::new_v4().to_string(),
        project_name: project_name(requirements),
        timestamp: Utc::now().timestamp_millis(),
        result,
        config: Some(request.config),
        attachment: request.attachment,
    };
    state.store.save_history(&entry).await?;

    Ok(Json(entry))
}

/// History display name: the first 40 characters of the requirements.
fn project_name(requirements: &str) -> String {
    let prefix: String = requirements.chars().take(40).collect();
    format!("{prefix}...")
}
