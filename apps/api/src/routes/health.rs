use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness probe.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "API is live",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
