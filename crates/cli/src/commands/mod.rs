//! CLI command implementations.

pub mod migrate;
pub mod product;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

use minishop_web::db;

/// Connect to the shop database using the same env lookup as the server.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection
/// fails.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("MINISHOP_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "MINISHOP_DATABASE_URL not set")?;

    Ok(db::create_pool(&database_url).await?)
}
