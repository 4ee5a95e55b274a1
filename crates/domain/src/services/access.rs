//! Authorization rules binding principals to tenants.
//!
//! Decisions are pure: callers resolve the principal and the tenant that owns
//! the addressed resource, then ask [`authorize`].

use serde::Serialize;
use uuid::Uuid;

use crate::models::user::AdminRole;

/// An authenticated (or anonymous) caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Principal {
    #[serde(rename_all = "camelCase")]
    Admin { id: Uuid, role: AdminRole },
    /// A wedding owner. `wedding_id` is `None` until setup is complete.
    #[serde(rename_all = "camelCase")]
    User {
        user_id: Uuid,
        wedding_id: Option<Uuid>,
    },
    Anonymous,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Admin { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Principal::Anonymous)
    }
}

/// Everything a caller can ask the service to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Guest-facing
    ResolveWedding,
    ListEvents,
    ListGallery,
    GetMenuConfig,
    ListWishes,
    SubmitRsvp,
    SubmitWish,
    // Tenant-scoped
    ViewOwnWedding,
    UpdateTheme,
    UpdateMenuConfig,
    ManageEvents,
    ManageGallery,
    ListGuests,
    DeleteWish,
    ViewDashboard,
    // Platform
    ManageUsers,
    ManageAdmins,
    ListWeddings,
    ManageWeddings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    Public,
    Tenant,
    Platform,
}

impl Action {
    pub fn class(&self) -> ActionClass {
        use Action::*;
        match self {
            ResolveWedding | ListEvents | ListGallery | GetMenuConfig | ListWishes
            | SubmitRsvp | SubmitWish => ActionClass::Public,
            ViewOwnWedding | UpdateTheme | UpdateMenuConfig | ManageEvents | ManageGallery
            | ListGuests | DeleteWish | ViewDashboard => ActionClass::Tenant,
            ManageUsers | ManageAdmins | ListWeddings | ManageWeddings => ActionClass::Platform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// Decides whether `principal` may perform `action` on a resource owned by
/// `resource_tenant` (`None` for global records or platform resources).
pub fn authorize(principal: &Principal, action: Action, resource_tenant: Option<Uuid>) -> Decision {
    match (action.class(), principal) {
        (ActionClass::Public, _) => Decision::Allow,
        (_, Principal::Admin { role, .. }) => match action {
            Action::ManageAdmins => (*role == AdminRole::Superadmin).into(),
            _ => Decision::Allow,
        },
        (ActionClass::Tenant, Principal::User { wedding_id, .. }) => {
            (wedding_id.is_some() && *wedding_id == resource_tenant).into()
        }
        _ => Decision::Deny,
    }
}

/// Wedding creation is checked against the prospective owner: users may only
/// create a wedding for themselves.
pub fn authorize_wedding_creation(principal: &Principal, owner_id: Uuid) -> Decision {
    match principal {
        Principal::Admin { .. } => Decision::Allow,
        Principal::User { user_id, .. } => (*user_id == owner_id).into(),
        Principal::Anonymous => Decision::Deny,
    }
}
