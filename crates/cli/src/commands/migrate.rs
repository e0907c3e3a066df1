//! Database migration command.
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded
//! at compile time, so the binary can migrate any environment it can
//! reach.

use tracing::info;

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
