//! Database migration commands.
//!
//! Migrations live in `crates/admin/migrations/` (the admin crate owns the
//! schema) and are embedded at compile time with `sqlx::migrate!`. They are
//! only ever run from here - never on server startup.

use sqlx::Row;
use sqlx::migrate::Migrator;

use super::CliError;

/// Embedded migrations from the admin crate.
static MIGRATOR: Migrator = sqlx::migrate!("../admin/migrations");

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}

/// Show applied and pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
#[allow(clippy::print_stdout)]
pub async fn status() -> Result<(), CliError> {
    let pool = super::connect().await?;

    // Versions already recorded by the migrator
    let applied: Vec<i64> = sqlx::query("SELECT version FROM _sqlx_migrations ORDER BY version")
        .fetch_all(&pool)
        .await
        .map(|rows| rows.iter().map(|row| row.get::<i64, _>("version")).collect())
        .unwrap_or_default();

    for migration in MIGRATOR.iter() {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        println!("{:>14} {:<8} {}", migration.version, state, migration.description);
    }

    Ok(())
}
