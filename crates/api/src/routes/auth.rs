//! Login, logout and session introspection.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use domain::services::Principal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Authenticated;
use crate::middleware::metrics::record_login_attempt;
use crate::services::AuthService;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User email, or admin username
    #[validate(length(min = 1, max = 255, message = "Identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub principal: Principal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub principal: Principal,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let result = AuthService::new(state.pool.clone(), state.jwt.clone())
        .login(&request.identifier, &request.password)
        .await;
    record_login_attempt(result.is_ok());
    let result = result?;

    Ok(Json(LoginResponse {
        token: result.token,
        token_type: "Bearer",
        expires_at: result.expires_at,
        principal: result.principal,
    }))
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
) -> Result<StatusCode, ApiError> {
    AuthService::new(state.pool.clone(), state.jwt.clone())
        .logout(&session.claims)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(Authenticated(session): Authenticated) -> Json<SessionResponse> {
    Json(SessionResponse {
        principal: session.principal,
        role: session.claims.role.clone(),
        expires_at: session.claims.expires_at(),
    })
}
