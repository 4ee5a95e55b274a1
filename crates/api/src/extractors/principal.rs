//! Session resolution from `Authorization: Bearer` tokens.
//!
//! A token resolves to a [`Principal`] only if its signature and expiry are
//! valid, its id has not been revoked, and the account behind it still
//! exists (and, for users, is active).

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use domain::services::{authorize, Action, Principal};
use persistence::repositories::{
    AdminRepository, RevokedTokenRepository, UserRepository, WeddingRepository,
};
use shared::jwt::{Claims, SubjectKind};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// A verified token and the principal it stands for.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub claims: Claims,
}

/// Requires a valid session; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Session);

/// Resolves a session when a token is presented, `Anonymous` when none is.
/// A presented but unusable token is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Principal);

async fn bearer_token(parts: &mut Parts, state: &AppState) -> Result<Option<String>, ApiError> {
    match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
        Ok(TypedHeader(Authorization(bearer))) => Ok(Some(bearer.token().to_string())),
        Err(rejection) if rejection.is_missing() => Ok(None),
        Err(_) => Err(ApiError::Unauthorized(
            "Invalid Authorization header format".into(),
        )),
    }
}

/// Verifies `token` and loads the principal behind it.
pub async fn resolve_session(state: &AppState, token: &str) -> Result<Session, ApiError> {
    let claims = state.jwt.validate_token(token)?;
    let subject = claims.subject_id()?;

    let revoked = RevokedTokenRepository::new(state.pool.clone())
        .is_revoked(claims.token_id()?)
        .await?;
    if revoked {
        return Err(ApiError::Unauthorized("Token has been revoked".into()));
    }

    let principal = match claims.kind {
        SubjectKind::User => user_principal(state, subject).await?,
        SubjectKind::Admin => {
            let admin = AdminRepository::new(state.pool.clone())
                .find_by_id(subject)
                .await?
                .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".into()))?;
            Principal::Admin {
                id: admin.id,
                role: admin.role,
            }
        }
    };

    Ok(Session { principal, claims })
}

async fn user_principal(state: &AppState, user_id: Uuid) -> Result<Principal, ApiError> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| ApiError::Unauthorized("Account is inactive or no longer exists".into()))?;

    let wedding_id = WeddingRepository::new(state.pool.clone())
        .find_id_by_user(user.id)
        .await?;

    Ok(Principal::User {
        user_id: user.id,
        wedding_id,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state)
            .await?
            .ok_or_else(ApiError::unauthenticated)?;
        let session = resolve_session(state, &token).await?;
        Ok(Authenticated(session))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts, state).await? {
            Some(token) => {
                let session = resolve_session(state, &token).await?;
                Ok(MaybeAuthenticated(session.principal))
            }
            None => Ok(MaybeAuthenticated(Principal::Anonymous)),
        }
    }
}

/// Maps a denial to 401 for anonymous callers and an opaque 403 otherwise.
pub fn ensure_allowed(
    principal: &Principal,
    action: Action,
    resource_tenant: Option<Uuid>,
) -> Result<(), ApiError> {
    if authorize(principal, action, resource_tenant).is_allowed() {
        return Ok(());
    }

    if principal.is_authenticated() {
        tracing::debug!(?principal, ?action, ?resource_tenant, "Access denied");
        Err(ApiError::forbidden())
    } else {
        Err(ApiError::unauthenticated())
    }
}

/// Error for a resource addressed by its own id that does not exist:
/// admins learn it is missing, everyone else gets the same 403 as a denial.
pub fn missing_resource(principal: &Principal, what: &str) -> ApiError {
    if principal.is_admin() {
        ApiError::NotFound(format!("{} not found", what))
    } else if principal.is_authenticated() {
        ApiError::forbidden()
    } else {
        ApiError::unauthenticated()
    }
}
