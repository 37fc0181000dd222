//! Admin allow-list database operations.
//!
//! The `admin_users` table doubles as the back-office allow-list: a login
//! succeeds only for an active row whose password hash verifies.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use verdant_core::{AdminRole, AdminUser, AdminUserId, Email};

use super::{RepositoryError, map_constraint};

/// Row shape used internally when the password hash is needed.
#[derive(sqlx::FromRow)]
struct AdminUserWithHash {
    id: AdminUserId,
    email: Email,
    name: String,
    role: AdminRole,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    password_hash: String,
}

impl AdminUserWithHash {
    fn split(self) -> (AdminUser, String) {
        (
            AdminUser {
                id: self.id,
                email: self.email,
                name: self.name,
                role: self.role,
                is_active: self.is_active,
                created_at: self.created_at,
                last_login_at: self.last_login_at,
            },
            self.password_hash,
        )
    }
}

const COLUMNS: &str = "id, email, name, role, is_active, created_at, last_login_at";

/// Fetch an active admin together with the stored password hash.
///
/// Returns `None` when the email is not on the allow-list or the row is
/// deactivated - callers treat both identically to avoid leaking which.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_active_with_hash(
    pool: &PgPool,
    email: &Email,
) -> Result<Option<(AdminUser, String)>, RepositoryError> {
    let row = sqlx::query_as::<_, AdminUserWithHash>(
        r"
        SELECT id, email, name, role, is_active, created_at, last_login_at, password_hash
        FROM admin_users
        WHERE email = $1 AND is_active
        ",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(AdminUserWithHash::split))
}

/// List all admin users, including deactivated ones.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<AdminUser>, RepositoryError> {
    let users = sqlx::query_as::<_, AdminUser>(&format!(
        "SELECT {COLUMNS} FROM admin_users ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Create an admin user.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the email is already registered.
pub async fn create(
    pool: &PgPool,
    email: &Email,
    name: &str,
    role: AdminRole,
    password_hash: &str,
) -> Result<AdminUser, RepositoryError> {
    let user = sqlx::query_as::<_, AdminUser>(&format!(
        r"
        INSERT INTO admin_users (email, name, role, password_hash, is_active)
        VALUES ($1, $2, $3, $4, TRUE)
        RETURNING {COLUMNS}
        "
    ))
    .bind(email)
    .bind(name)
    .bind(role)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| map_constraint(e, "An admin with this email already exists."))?;

    Ok(user)
}

/// Activate or deactivate an admin user by email.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no admin has the email.
pub async fn set_active(pool: &PgPool, email: &Email, active: bool) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE admin_users SET is_active = $2 WHERE email = $1")
        .bind(email)
        .bind(active)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Stamp a successful login.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub async fn record_login(pool: &PgPool, id: AdminUserId) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE admin_users SET last_login_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
