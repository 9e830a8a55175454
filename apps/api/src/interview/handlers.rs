//! Axum route handlers for the interview, requirements and candidate APIs.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::admission::{AdmissionOutcome, SubmitRequest};
use crate::interview::models::{Candidate, InterviewConfig, RequirementsUpdate};
use crate::state::AppState;

/// POST /api/submit-interview
pub async fn handle_submit_interview(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<AdmissionOutcome>, AppError> {
    let Json(request) = payload?;
    let outcome = state.admissions.admit(request).await?;
    Ok(Json(outcome))
}

/// GET /api/requirements
pub async fn handle_get_requirements(
    State(state): State<AppState>,
) -> Result<Json<InterviewConfig>, AppError> {
    Ok(Json(state.settings.load().await?))
}

/// POST /api/requirements
///
/// Replaces the interview configuration wholesale. Omitted keys fall back
/// to their defaults rather than keeping previous values.
pub async fn handle_replace_requirements(
    State(state): State<AppState>,
    payload: Result<Json<RequirementsUpdate>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(update) = payload?;
    let config = InterviewConfig::from(update);
    config.validate()?;

    state.settings.save(&config).await?;
    info!(
        hr_score = config.hr_score,
        hr_time_limit = config.hr_time_limit,
        fields = config.fields.len(),
        "Interview requirements replaced"
    );

    Ok(Json(json!({ "status": "success" })))
}

/// GET /api/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    Ok(Json(state.candidates.list().await?))
}

/// DELETE /api/candidates/:id
///
/// Succeeds whether or not the id exists. Ids that are not UUIDs cannot
/// match a stored candidate and are treated the same as unknown ones.
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    match Uuid::parse_str(&id) {
        Ok(id) => {
            let removed = state.candidates.remove(id).await?;
            info!(candidate_id = %id, removed, "Candidate delete requested");
        }
        Err(_) => info!(candidate_id = %id, "Delete requested for non-UUID id, nothing to do"),
    }
    Ok(Json(json!({ "status": "success" })))
}
