//! First superadmin, created on startup from configuration.
//!
//! Runs once per empty `admins` table; later boots are no-ops even if the
//! credentials are still configured.

use persistence::repositories::AdminRepository;
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminBootstrapConfig;

const MIN_BOOTSTRAP_PASSWORD_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Outcome of a bootstrap attempt, mainly for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AlreadyInitialized,
    Created { username: String },
}

fn check_config(config: &AdminBootstrapConfig) -> Result<bool, BootstrapError> {
    let username = config.bootstrap_username.trim();
    if username.is_empty() {
        return Ok(false);
    }
    if config.bootstrap_password.len() < MIN_BOOTSTRAP_PASSWORD_LEN {
        return Err(BootstrapError::Config(format!(
            "WEDDING__ADMIN__BOOTSTRAP_PASSWORD must be at least {} characters",
            MIN_BOOTSTRAP_PASSWORD_LEN
        )));
    }
    Ok(true)
}

/// Creates the first superadmin if configured and no admin exists yet.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    if !check_config(config)? {
        return Ok(BootstrapOutcome::NotConfigured);
    }

    let username = config.bootstrap_username.trim();
    let password_hash = hash_password(&config.bootstrap_password)?;

    let created = AdminRepository::new(pool.clone())
        .create_first_superadmin(username, &password_hash)
        .await?;

    match created {
        Some(admin) => {
            info!(
                admin_id = %admin.id,
                username = %admin.username,
                "Bootstrap superadmin created"
            );
            warn!(
                "SECURITY: Remove WEDDING__ADMIN__BOOTSTRAP_USERNAME and \
                 WEDDING__ADMIN__BOOTSTRAP_PASSWORD from configuration after initial setup"
            );
            Ok(BootstrapOutcome::Created {
                username: admin.username,
            })
        }
        None => {
            info!("An admin already exists - skipping bootstrap");
            Ok(BootstrapOutcome::AlreadyInitialized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: &str, password: &str) -> AdminBootstrapConfig {
        AdminBootstrapConfig {
            bootstrap_username: username.to_string(),
            bootstrap_password: password.to_string(),
        }
    }

    #[test]
    fn test_unconfigured_is_skipped() {
        assert!(!check_config(&config("", "")).unwrap());
        assert!(!check_config(&config("   ", "whatever-password")).unwrap());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let err = check_config(&config("root", "short")).unwrap_err();
        assert!(err.to_string().contains("BOOTSTRAP_PASSWORD"));
    }

    #[test]
    fn test_valid_config_accepted() {
        assert!(check_config(&config("root", "a-long-bootstrap-secret")).unwrap());
    }
}
