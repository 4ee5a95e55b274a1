//! Guest wishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::guest::GuestScope;

/// A congratulatory message left by a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wish {
    pub id: Uuid,
    pub wedding_id: Option<Uuid>,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWishRequest {
    pub wedding_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWish {
    pub scope: GuestScope,
    pub name: String,
    pub message: String,
}

impl From<SubmitWishRequest> for NewWish {
    fn from(req: SubmitWishRequest) -> Self {
        Self {
            scope: req.wedding_id.into(),
            name: req.name.trim().to_string(),
            message: req.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListWishesQuery {
    pub wedding_id: Option<Uuid>,
    pub search: Option<String>,
}

impl ListWishesQuery {
    pub fn scope(&self) -> GuestScope {
        self.wedding_id.into()
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_wish_validation() {
        let ok = SubmitWishRequest {
            wedding_id: None,
            name: "Citra".to_string(),
            message: "Selamat menempuh hidup baru".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = SubmitWishRequest {
            message: " ".to_string(),
            ..ok.clone()
        };
        assert!(empty.validate().is_err());

        let too_long = SubmitWishRequest {
            message: "x".repeat(1001),
            ..ok
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_new_wish_scope() {
        let id = Uuid::new_v4();
        let wish: NewWish = SubmitWishRequest {
            wedding_id: Some(id),
            name: " Citra ".to_string(),
            message: "Barakallah".to_string(),
        }
        .into();
        assert_eq!(wish.scope, GuestScope::Tenant(id));
        assert_eq!(wish.name, "Citra");
    }
}
