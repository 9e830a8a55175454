pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::auth::{self, handlers as auth_handlers};
use crate::interview::handlers;
use crate::state::AppState;
use crate::uploads::handlers as upload_handlers;

pub fn build_router(state: AppState) -> Router {
    // Candidate review (HR; admin tokens also accepted)
    let hr_routes = Router::new()
        .route("/api/candidates", get(handlers::handle_list_candidates))
        .route(
            "/api/candidates/:id",
            delete(handlers::handle_delete_candidate),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_hr,
        ));

    // Interview requirements (admin only)
    let admin_routes = Router::new()
        .route(
            "/api/requirements",
            get(handlers::handle_get_requirements).post(handlers::handle_replace_requirements),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/", get(health::health_handler))
        .route("/login", post(auth_handlers::handle_login_hr))
        .route("/login1", post(auth_handlers::handle_login_admin))
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/logout1", get(auth_handlers::handle_logout))
        // Interview flow (public)
        .route("/api/upload", post(upload_handlers::handle_upload))
        .route(
            "/api/submit-interview",
            post(handlers::handle_submit_interview),
        )
        .merge(hr_routes)
        .merge(admin_routes)
        .nest_service("/resumes", ServeDir::new(&state.config.upload_dir))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
