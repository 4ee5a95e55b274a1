//! Login and logout for wedding owners and platform admins.

use chrono::{DateTime, Utc};
use domain::services::Principal;
use persistence::repositories::{
    AdminRepository, RevokedTokenRepository, UserRepository, WeddingRepository,
};
use shared::jwt::{Claims, JwtConfig, JwtError, SubjectKind};
use shared::password::{verify_against_dummy, verify_password, PasswordError};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::error::ApiError;

/// Role claim carried by wedding owner tokens.
pub const OWNER_ROLE: &str = "owner";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier, wrong password and inactive account all end here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".into())
            }
            AuthError::Token(e) => e.into(),
            AuthError::Password(e) => e.into(),
            AuthError::Database(e) => e.into(),
        }
    }
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub principal: Principal,
}

/// Which table a login identifier is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    UserEmail,
    AdminUsername,
}

impl IdentifierKind {
    pub fn of(identifier: &str) -> Self {
        if identifier.contains('@') {
            IdentifierKind::UserEmail
        } else {
            IdentifierKind::AdminUsername
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtConfig>) -> Self {
        Self { pool, jwt }
    }

    /// Verifies credentials and issues a session token.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginResult, AuthError> {
        let identifier = identifier.trim();
        match IdentifierKind::of(identifier) {
            IdentifierKind::UserEmail => self.login_user(identifier, password).await,
            IdentifierKind::AdminUsername => self.login_admin(identifier, password).await,
        }
    }

    async fn login_user(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = match UserRepository::new(self.pool.clone()).find_by_email(email).await? {
            Some(user) => user,
            None => {
                verify_against_dummy(password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? || !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        let wedding_id = WeddingRepository::new(self.pool.clone())
            .find_id_by_user(user.id)
            .await?;
        let issued = self.jwt.issue(user.id, SubjectKind::User, OWNER_ROLE)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            principal: Principal::User {
                user_id: user.id,
                wedding_id,
            },
        })
    }

    async fn login_admin(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let admin = match AdminRepository::new(self.pool.clone())
            .find_by_username(username)
            .await?
        {
            Some(admin) => admin,
            None => {
                verify_against_dummy(password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &admin.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .jwt
            .issue(admin.id, SubjectKind::Admin, admin.role.as_str())?;

        tracing::info!(admin_id = %admin.id, role = %admin.role, "Admin logged in");

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            principal: Principal::Admin {
                id: admin.id,
                role: admin.role,
            },
        })
    }

    /// Revokes the presented token until its natural expiry and sweeps
    /// revocations that have expired.
    pub async fn logout(&self, claims: &Claims) -> Result<(), AuthError> {
        let repo = RevokedTokenRepository::new(self.pool.clone());
        repo.revoke(claims.token_id()?, claims.expires_at()).await?;

        match repo.purge_expired().await {
            Ok(purged) if purged > 0 => {
                tracing::debug!(purged = purged, "Purged expired token revocations")
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to purge expired token revocations"),
        }

        tracing::info!(subject = %claims.sub, kind = ?claims.kind, "Session revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_kind() {
        assert_eq!(IdentifierKind::of("ana@example.com"), IdentifierKind::UserEmail);
        assert_eq!(IdentifierKind::of("root"), IdentifierKind::AdminUsername);
        assert_eq!(IdentifierKind::of("@"), IdentifierKind::UserEmail);
    }

    #[test]
    fn test_invalid_credentials_maps_to_unauthorized() {
        let err: ApiError = AuthError::InvalidCredentials.into();
        match err {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_database_error_maps_through() {
        let err: ApiError = AuthError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
