//! User domain type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use minishop_core::{Email, UserId, Username};

/// A registered shop account.
///
/// `password_hash` is an Argon2 PHC string; the plaintext never leaves
/// the registration and login handlers.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name chosen at registration.
    pub username: Username,
    /// User's email address (unique).
    pub email: Email,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
