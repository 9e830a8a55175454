use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{bearer_token, Role};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub role: Role,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// POST /login
pub async fn handle_login_hr(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    login(&state, payload?.0, Role::Hr, "HR Logged in")
}

/// POST /login1
pub async fn handle_login_admin(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    login(&state, payload?.0, Role::Admin, "Admin Logged in")
}

fn login(
    state: &AppState,
    request: LoginRequest,
    role: Role,
    message: &'static str,
) -> Result<Json<LoginResponse>, AppError> {
    if !state
        .auth
        .check_credentials(&request.username, &request.password)
    {
        warn!(username = %request.username, %role, "Failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let issued = state.auth.issue(role)?;
    info!(%role, expires_at = %issued.expires_at, "Logged in");

    Ok(Json(LoginResponse {
        status: "success",
        message,
        role: issued.role,
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// GET /logout and GET /logout1
///
/// Revokes the presented bearer token, if any. Always succeeds so clients
/// can log out unconditionally.
pub async fn handle_logout(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    if let Some(token) = bearer_token(&headers) {
        if state.auth.revoke(token).await {
            info!("Bearer token revoked");
        }
    }
    Json(json!({ "status": "success", "message": "Logged out" }))
}
