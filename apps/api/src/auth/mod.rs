//! Bearer-token authentication for the HR and admin endpoints.
//!
//! Logging in with the shared credential pair yields an HS256 JWT carrying a
//! role claim. Protected routes run `require_hr` / `require_admin` as a route
//! layer; no server-side session exists. Logout records the token's `jti` in
//! an in-memory revocation list until the token would have expired anyway.

use std::collections::HashMap;
use std::fmt;

use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub mod handlers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    Admin,
}

impl Role {
    /// Admin tokens open HR routes too; HR tokens open only HR routes.
    pub fn grants(self, required: Role) -> bool {
        self == Role::Admin || self == required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Hr => f.write_str("hr"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

pub struct Authenticator {
    credentials: Credentials,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    /// jti -> exp of logged-out tokens.
    revoked: RwLock<HashMap<Uuid, i64>>,
}

impl Authenticator {
    pub fn new(credentials: Credentials, secret: &[u8], ttl: Duration) -> Self {
        Self {
            credentials,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        username == self.credentials.username && password == self.credentials.password
    }

    pub fn issue(&self, role: Role) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .context("Token lifetime runs past the representable date range")?;
        let claims = Claims {
            sub: self.credentials.username.clone(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("Failed to encode bearer token")?;

        Ok(IssuedToken {
            token,
            role,
            expires_at,
        })
    }

    /// Returns the claims of a well-signed, unexpired, unrevoked token.
    pub async fn verify(&self, token: &str) -> Option<Claims> {
        let claims = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!("Rejected bearer token: {e}");
                return None;
            }
        };
        if self.revoked.read().await.contains_key(&claims.jti) {
            debug!(jti = %claims.jti, "Rejected revoked bearer token");
            return None;
        }
        Some(claims)
    }

    /// Revokes a valid token. Returns false if the token was already unusable.
    pub async fn revoke(&self, token: &str) -> bool {
        let Some(claims) = self.verify(token).await else {
            return false;
        };
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti, claims.exp);
        true
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Route layer for the candidate review endpoints.
pub async fn require_hr(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, request, next, Role::Hr).await
}

/// Route layer for the requirements endpoints.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, request, next, Role::Admin).await
}

async fn authorize(
    state: &AppState,
    mut request: Request,
    next: Next,
    required: Role,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .map(str::to_owned)
        .ok_or(AppError::Unauthorized { role: required })?;

    let claims = state
        .auth
        .verify(&token)
        .await
        .ok_or(AppError::Unauthorized { role: required })?;

    if !claims.role.grants(required) {
        warn!(role = %claims.role, %required, path = %request.uri().path(), "Insufficient role");
        return Err(AppError::Forbidden { role: required });
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
