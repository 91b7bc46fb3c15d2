//! One-shot flash notices.
//!
//! Messages queue up in the session and are drained by the next rendered
//! page, mirroring the usual post/redirect/get notice pattern.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity of a flash notice, mapped to styling in the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    /// CSS class suffix for this level.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// A single one-shot notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a notice for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut flashes: Vec<FlashMessage> = session
        .get(session_keys::FLASHES)
        .await?
        .unwrap_or_default();

    flashes.push(FlashMessage {
        level,
        message: message.into(),
    });

    session.insert(session_keys::FLASHES, flashes).await
}

/// Drain all queued notices; subsequent calls return nothing until new
/// notices are pushed.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn take_flashes(
    session: &Session,
) -> Result<Vec<FlashMessage>, tower_sessions::session::Error> {
    let flashes: Option<Vec<FlashMessage>> = session.remove(session_keys::FLASHES).await?;
    Ok(flashes.unwrap_or_default())
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
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&FlashLevel::Danger).unwrap();
        assert_eq!(json, "\"danger\"");
    }

    #[test]
    fn test_message_roundtrip() {
        let flash = FlashMessage {
            level: FlashLevel::Success,
            message: "Product added to cart!".to_owned(),
        };
        let json = serde_json::to_string(&flash).unwrap();
        let parsed: FlashMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.level, FlashLevel::Success);
        assert_eq!(parsed.message, "Product added to cart!");
    }

    #[test]
    fn test_css_class() {
        assert_eq!(FlashLevel::Success.css_class(), "success");
        assert_eq!(FlashLevel::Danger.css_class(), "danger");
    }

    #[tokio::test]
    async fn test_take_preserves_push_order() {
        let session = test_session();
        push_flash(&session, FlashLevel::Danger, "first").await.unwrap();
        push_flash(&session, FlashLevel::Success, "second").await.unwrap();

        let flashes = take_flashes(&session).await.unwrap();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "first");
        assert_eq!(flashes[0].level, FlashLevel::Danger);
        assert_eq!(flashes[1].message, "second");
        assert_eq!(flashes[1].level, FlashLevel::Success);
    }

    #[tokio::test]
    async fn test_take_drains_the_queue() {
        let session = test_session();
        push_flash(&session, FlashLevel::Success, "once").await.unwrap();

        assert_eq!(take_flashes(&session).await.unwrap().len(), 1);
        // Drained; a second render sees nothing
        assert!(take_flashes(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_take_on_fresh_session_is_empty() {
        let session = test_session();
        assert!(take_flashes(&session).await.unwrap().is_empty());
    }
}
