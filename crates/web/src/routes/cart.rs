//! Cart overview route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::CartRepository;
use crate::db::cart::CartLine;
use crate::error::{AppError, Result};
use crate::flash::{FlashMessage, take_flashes};
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<FlashMessage>,
    pub lines: Vec<CartLine>,
}

/// Display the logged-in user's cart lines.
///
/// Repeated adds of the same product appear as separate lines, matching
/// how they are stored.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<CartTemplate> {
    let lines = CartRepository::new(state.pool())
        .lines_for_user(user.id)
        .await?;

    let flashes = take_flashes(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(CartTemplate {
        current_user: Some(user),
        flashes,
        lines,
    })
}
