//! Session-facing models for the back-office.

use serde::{Deserialize, Serialize};

use verdant_core::{AdminRole, AdminUser, AdminUserId, Email};

/// Session keys used by the admin binary.
pub mod session_keys {
    /// Key the logged-in admin is stored under.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// The logged-in admin, as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
}

impl From<AdminUser> for CurrentAdmin {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}
