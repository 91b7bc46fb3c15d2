//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions with a signed
//! cookie.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "minishop_session";

/// Inactivity expiry for remembered sessions (30 days).
const REMEMBER_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The default expiry is end-of-browser-session; a successful login
/// upgrades its own session to [`remember_expiry`].
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &AppConfig,
) -> SessionManagerLayer<PostgresStore, SignedCookie> {
    // Note: The session table is created via PostgresStore::migrate at startup
    let store = PostgresStore::new(pool.clone());

    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_signed(key)
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Long inactivity expiry applied to a session at login time (the
/// "remember me" behavior).
#[must_use]
pub fn remember_expiry() -> Expiry {
    Expiry::OnInactivity(tower_sessions::cookie::time::Duration::seconds(
        REMEMBER_EXPIRY_SECONDS,
    ))
}
