//! Product detail and add-to-cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use minishop_core::ProductId;

use crate::csrf;
use crate::db::{CartRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::flash::{FlashLevel, FlashMessage, push_flash, take_flashes};
use crate::forms::{AddToCartSubmission, FieldErrors};
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Product};
use crate::state::AppState;

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<FlashMessage>,
    pub product: Product,
    pub csrf_token: String,
    pub errors: FieldErrors,
    pub quantity: String,
}

async fn fetch_product(state: &AppState, id: i32) -> Result<Product> {
    ProductRepository::new(state.pool())
        .find_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

fn session_err(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(e.to_string())
}

/// Display the product detail page with its add-to-cart form.
#[instrument(skip(state, session, current_user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<i32>,
) -> Result<ProductTemplate> {
    let product = fetch_product(&state, id).await?;

    let csrf_token = csrf::ensure_token(&session).await.map_err(session_err)?;
    let flashes = take_flashes(&session).await.map_err(session_err)?;

    Ok(ProductTemplate {
        current_user,
        flashes,
        product,
        csrf_token,
        errors: FieldErrors::new(),
        quantity: "1".to_owned(),
    })
}

/// Handle the add-to-cart form submission.
///
/// A valid quantity from a logged-in user inserts one cart row and flashes
/// success; a valid quantity from an anonymous visitor flashes a notice and
/// mutates nothing. Both redirect home. An invalid quantity re-renders the
/// detail page with field errors.
#[instrument(skip(state, session, current_user, form))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<i32>,
    Form(form): Form<AddToCartSubmission>,
) -> Result<Response> {
    if !csrf::verify_token(&session, &form.csrf_token)
        .await
        .map_err(session_err)?
    {
        return Err(AppError::BadRequest("invalid anti-forgery token".into()));
    }

    let product = fetch_product(&state, id).await?;

    match form.validate() {
        Ok(valid) => {
            match &current_user {
                Some(user) => {
                    CartRepository::new(state.pool())
                        .add_item(user.id, product.id, valid.quantity)
                        .await?;
                    push_flash(&session, FlashLevel::Success, "Product added to cart!")
                        .await
                        .map_err(session_err)?;
                }
                None => {
                    push_flash(
                        &session,
                        FlashLevel::Danger,
                        "Please log in to add products to your cart.",
                    )
                    .await
                    .map_err(session_err)?;
                }
            }
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            let csrf_token = csrf::ensure_token(&session).await.map_err(session_err)?;
            let flashes = take_flashes(&session).await.map_err(session_err)?;

            Ok(ProductTemplate {
                current_user,
                flashes,
                product,
                csrf_token,
                errors,
                quantity: form.quantity,
            }
            .into_response())
        }
    }
}
