mod auth;
mod config;
mod errors;
mod interview;
mod routes;
mod state;
mod store;
mod uploads;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{Authenticator, Credentials};
use crate::config::Config;
use crate::interview::models::{Candidate, InterviewConfig};
use crate::interview::registry::CandidateRegistry;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Document stores
    let settings: JsonFileStore<InterviewConfig> =
        JsonFileStore::new(&config.interview_config_path);
    let candidates: JsonFileStore<Vec<Candidate>> = JsonFileStore::new(&config.candidates_path);
    info!(
        settings = %settings.path().display(),
        candidates = %candidates.path().display(),
        "Document stores configured"
    );

    // Resume directory
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Cannot create upload dir {}", config.upload_dir.display()))?;
    info!("Resumes stored under {}", config.upload_dir.display());

    // Bearer-token auth
    if config.uses_default_credentials() {
        warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set, using the built-in default credentials");
    }
    let auth = Authenticator::new(
        Credentials {
            username: config.admin_username.clone(),
            password: config.admin_password.clone(),
        },
        config.auth_secret.as_bytes(),
        chrono::Duration::minutes(config.token_ttl_minutes),
    );

    // Build app state
    let state = AppState::new(
        config.clone(),
        Arc::new(settings),
        Arc::new(CandidateRegistry::new(Arc::new(candidates))),
        auth,
    );

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
