use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin@admin";

/// HS256 keys shorter than the digest are trivially brute-forced.
pub const MIN_SECRET_LEN: usize = 32;
/// One year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub auth_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub token_ttl_minutes: i64,
    pub interview_config_path: PathBuf,
    pub candidates_path: PathBuf,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            auth_secret: check_auth_secret(require_env("AUTH_SECRET")?)?,
            admin_username: env_or("ADMIN_USERNAME", DEFAULT_USERNAME),
            admin_password: env_or("ADMIN_PASSWORD", DEFAULT_PASSWORD),
            token_ttl_minutes: check_token_ttl(parse_env("TOKEN_TTL_MINUTES", 480)?)?,
            interview_config_path: env_or("INTERVIEW_CONFIG_PATH", "interview_data.json").into(),
            candidates_path: env_or("CANDIDATES_PATH", "passed_candidates.json").into(),
            upload_dir: env_or("UPLOAD_DIR", "static/resumes").into(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_env("PORT", 5000)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn uses_default_credentials(&self) -> bool {
        self.admin_username == DEFAULT_USERNAME && self.admin_password == DEFAULT_PASSWORD
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn check_auth_secret(secret: String) -> Result<String> {
    let len = secret.trim().len();
    if len < MIN_SECRET_LEN {
        bail!("AUTH_SECRET must be at least {MIN_SECRET_LEN} non-blank bytes (got {len})");
    }
    Ok(secret)
}

fn check_token_ttl(minutes: i64) -> Result<i64> {
    if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
        bail!("TOKEN_TTL_MINUTES must be between 1 and {MAX_TOKEN_TTL_MINUTES} (got {minutes})");
    }
    Ok(minutes)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number (got '{raw}')")),
        Err(_) => Ok(default),
    }
}
