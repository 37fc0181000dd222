//! Admin-user management commands.

use rand::Rng;
use rand::distr::Alphanumeric;

use verdant_admin::db::admin_users;
use verdant_admin::services::auth;
use verdant_core::{AdminRole, Email};

use super::CliError;

/// Length of generated admin passwords.
const GENERATED_PASSWORD_LENGTH: usize = 24;

/// Create an admin user with a generated password.
///
/// The password is printed exactly once; only its argon2 hash is stored.
///
/// # Errors
///
/// Returns an error on an invalid email/role, a duplicate email, or a
/// database failure.
#[allow(clippy::print_stdout)]
pub async fn create_user(email: &str, name: &str, role: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::Invalid(format!("invalid email: {e}")))?;
    let role = AdminRole::from_str_opt(role).ok_or_else(|| {
        CliError::Invalid(format!(
            "unknown role '{role}' (expected viewer, admin, or super_admin)"
        ))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Invalid("name cannot be empty".to_string()));
    }

    let password = generate_password();
    let password_hash =
        auth::hash_password(&password).map_err(|e| CliError::Invalid(e.to_string()))?;

    let pool = super::connect().await?;
    let user = admin_users::create(&pool, &email, name, role, &password_hash)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    println!("Created admin user:");
    println!("  email: {}", user.email);
    println!("  name:  {}", user.name);
    println!("  role:  {}", user.role);
    println!();
    println!("Initial password (shown once, change it after first login):");
    println!("  {password}");

    Ok(())
}

/// Deactivate an admin user by email.
///
/// # Errors
///
/// Returns an error if the email is invalid or not registered.
#[allow(clippy::print_stdout)]
pub async fn deactivate_user(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::Invalid(format!("invalid email: {e}")))?;

    let pool = super::connect().await?;
    admin_users::set_active(&pool, &email, false)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    println!("Deactivated {email}");
    Ok(())
}

/// Generate a random alphanumeric password.
fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_passwords_are_long_and_distinct() {
        let a = generate_password();
        let b = generate_password();
        assert_eq!(a.len(), GENERATED_PASSWORD_LENGTH);
        assert_ne!(a, b);
    }
}
