//! User and admin domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::wedding::WeddingSummary;

/// A wedding owner account.
///
/// `password_hash` never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row joined with the wedding they own, for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithWedding {
    #[serde(flatten)]
    pub user: User,
    pub wedding: Option<WeddingSummary>,
}

/// Platform administrator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
    Superadmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Superadmin => "superadmin",
        }
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(AdminRole::Admin),
            "superadmin" => Ok(AdminRole::Superadmin),
            _ => Err(format!("Unknown admin role: {}", s)),
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform administrator, a principal class separate from [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AdminRole,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Optional wedding setup carried by a user creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WeddingSetup {
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: String,
    pub wedding_date: NaiveDate,
    #[validate(length(min = 1, max = 200, message = "Couple name must be 1-200 characters"))]
    pub couple_name: Option<String>,
}

/// Request to create a user (admin action).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,
    #[validate(nested)]
    pub wedding: Option<WeddingSetup>,
}

impl CreateUserRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Partial update of a user account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Request to create an admin (superadmin action).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    pub role: Option<AdminRole>,
    pub user_id: Option<Uuid>,
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_role_from_str() {
        assert_eq!(AdminRole::from_str("admin").unwrap(), AdminRole::Admin);
        assert_eq!(AdminRole::from_str("SuperAdmin").unwrap(), AdminRole::Superadmin);
        assert!(AdminRole::from_str("owner").is_err());
    }

    #[test]
    fn test_user_serialization_hides_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Ana".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn test_create_user_request_validation() {
        let valid = CreateUserRequest {
            email: "ana@example.com".to_string(),
            password: "longenough".to_string(),
            name: "Ana".to_string(),
            wedding: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateUserRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUserRequest {
            password: "short".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let blank_name = CreateUserRequest {
            name: "   ".to_string(),
            ..valid
        };
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_nested_wedding_setup_is_validated() {
        let request = CreateUserRequest {
            email: "ana@example.com".to_string(),
            password: "longenough".to_string(),
            name: "Ana".to_string(),
            wedding: Some(WeddingSetup {
                slug: "Bad Slug".to_string(),
                wedding_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                couple_name: None,
            }),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
