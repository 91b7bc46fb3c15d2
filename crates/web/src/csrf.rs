//! Anti-forgery tokens for state-changing forms.
//!
//! Every form that mutates state embeds a per-session random token which is
//! compared against the session copy on submit. A missing or mismatched
//! token rejects the request before any validation or data access runs.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use subtle::ConstantTimeEq;
use tower_sessions::Session;

use crate::models::session_keys;

/// Number of random bytes behind each token.
const TOKEN_BYTES: usize = 32;

/// Generate a fresh URL-safe token.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Return the session's token, minting one on first use.
///
/// Called by every handler that renders a form so the token can be
/// embedded as a hidden field.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn ensure_token(session: &Session) -> Result<String, tower_sessions::session::Error> {
    if let Some(token) = session.get::<String>(session_keys::CSRF_TOKEN).await? {
        return Ok(token);
    }

    let token = generate_token();
    session
        .insert(session_keys::CSRF_TOKEN, token.clone())
        .await?;
    Ok(token)
}

/// Check a submitted token against the session copy.
///
/// Returns `false` when the session holds no token (nothing was ever
/// rendered to this browser) or the values differ.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn verify_token(
    session: &Session,
    submitted: &str,
) -> Result<bool, tower_sessions::session::Error> {
    let Some(expected) = session.get::<String>(session_keys::CSRF_TOKEN).await? else {
        return Ok(false);
    };

    // Constant-time comparison; differing lengths compare unequal
    let matches: bool = expected.as_bytes().ct_eq(submitted.as_bytes()).into();
    Ok(!submitted.is_empty() && matches)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[test]
    fn test_token_is_url_safe_base64() {
        let token = generate_token();
        assert!(URL_SAFE_NO_PAD.decode(&token).is_ok());
        assert_eq!(URL_SAFE_NO_PAD.decode(&token).map(|b| b.len()), Ok(32));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[tokio::test]
    async fn test_ensure_token_is_stable_per_session() {
        let session = test_session();
        let first = ensure_token(&session).await.unwrap();
        let second = ensure_token(&session).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_verify_accepts_matching_token() {
        let session = test_session();
        let token = ensure_token(&session).await.unwrap();
        assert!(verify_token(&session, &token).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejects_mismatched_token() {
        let session = test_session();
        let token = ensure_token(&session).await.unwrap();
        assert!(!verify_token(&session, "not-the-token").await.unwrap());
        // A truncated copy of the real token must also fail
        assert!(!verify_token(&session, &token[..token.len() - 1]).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejects_empty_submission() {
        let session = test_session();
        ensure_token(&session).await.unwrap();
        assert!(!verify_token(&session, "").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejects_when_session_has_no_token() {
        let session = test_session();
        assert!(!verify_token(&session, "anything").await.unwrap());
    }
}
