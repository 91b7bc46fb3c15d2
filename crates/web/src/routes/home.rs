//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::flash::{FlashMessage, take_flashes};
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Product};
use crate::state::AppState;

/// Home page template: the whole catalog.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<FlashMessage>,
    pub products: Vec<Product>,
}

/// Display the product listing.
///
/// No auth required; an empty catalog renders fine.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<HomeTemplate> {
    let products = ProductRepository::new(state.pool()).list_all().await?;

    let flashes = take_flashes(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HomeTemplate {
        current_user,
        flashes,
        products,
    })
}
