use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::{allowed_file, sanitize_filename, store_resume};
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

/// POST /api/upload
///
/// Accepts a multipart form with a `resume` file field and returns the
/// sanitized name the file was stored under.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        if original.is_empty() {
            return Err(AppError::Validation("No selected file".to_string()));
        }
        let filename = sanitize_filename(&original)
            .filter(|name| allowed_file(&original) && allowed_file(name))
            .ok_or_else(|| AppError::Validation("Invalid file type".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let size = data.len();

        store_resume(&state.config.upload_dir, &filename, data)
            .await
            .with_context(|| format!("Failed to store resume {filename}"))?;

        info!(%filename, size, "Resume uploaded");
        return Ok(Json(json!({ "status": "success", "filename": filename })));
    }

    Err(AppError::Validation("No file part".to_string()))
}
