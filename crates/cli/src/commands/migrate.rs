//! Database migration command.
//!
//! Runs the migrations embedded from `crates/web/migrations/`. The
//! tower-sessions table is managed separately by the session store at
//! server startup.

use tracing::info;

/// Run shop database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
