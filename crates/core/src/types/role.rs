//! Admin role type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role of a back-office user.
///
/// Stored as text in the `admin_users` table. `Viewer` is read-only,
/// `Admin` can mutate content, `SuperAdmin` can additionally manage the
/// admin allow-list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Read-only access to the back-office.
    Viewer,
    /// Full content management.
    Admin,
    /// Content management plus admin-user management.
    SuperAdmin,
}

impl AdminRole {
    /// Whether this role may create, update, or delete content.
    #[must_use]
    pub const fn can_edit(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Canonical text form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Parse from the stored text form.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "viewer" => Some(Self::Viewer),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored as TEXT so the runtime query API needs no custom Postgres type.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for AdminRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for AdminRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Self::from_str_opt(&s).ok_or_else(|| format!("unknown admin role: {s}").into())
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for AdminRole {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_edit() {
        assert!(!AdminRole::Viewer.can_edit());
        assert!(AdminRole::Admin.can_edit());
        assert!(AdminRole::SuperAdmin.can_edit());
    }

    #[test]
    fn test_text_roundtrip() {
        for role in [AdminRole::Viewer, AdminRole::Admin, AdminRole::SuperAdmin] {
            assert_eq!(AdminRole::from_str_opt(role.as_str()), Some(role));
        }
        assert_eq!(AdminRole::from_str_opt("owner"), None);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AdminRole::SuperAdmin).expect("serialize");
        assert_eq!(json, "\"super_admin\"");
    }
}
