//! Authentication route handlers: register, login, logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::csrf;
use crate::error::{AppError, Result};
use crate::flash::{FlashLevel, FlashMessage, push_flash, take_flashes};
use crate::forms::{FieldError, FieldErrors, LoginSubmission, RegisterSubmission};
use crate::middleware::{OptionalAuth, clear_current_user, remember_expiry, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<FlashMessage>,
    pub csrf_token: String,
    pub errors: FieldErrors,
    pub username: String,
    pub email: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<FlashMessage>,
    pub csrf_token: String,
    pub errors: FieldErrors,
    pub email: String,
}

fn session_err(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(e.to_string())
}

// =============================================================================
// Registration
// =============================================================================

/// Display the registration page; logged-in users go home.
#[instrument(skip_all)]
pub async fn register_page(
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<Response> {
    if current_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let csrf_token = csrf::ensure_token(&session).await.map_err(session_err)?;
    let flashes = take_flashes(&session).await.map_err(session_err)?;

    Ok(RegisterTemplate {
        current_user: None,
        flashes,
        csrf_token,
        errors: FieldErrors::new(),
        username: String::new(),
        email: String::new(),
    }
    .into_response())
}

/// Handle the registration form submission.
///
/// On success the password is hashed, the user row inserted, and the
/// browser redirected to the login page with a success notice. A taken
/// email surfaces as a field error rather than a server error.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<RegisterSubmission>,
) -> Result<Response> {
    if current_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if !csrf::verify_token(&session, &form.csrf_token)
        .await
        .map_err(session_err)?
    {
        return Err(AppError::BadRequest("invalid anti-forgery token".into()));
    }

    let errors = match form.validate() {
        Ok(valid) => {
            match AuthService::new(state.pool())
                .register(&valid.username, &valid.email, &valid.password)
                .await
            {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "account created");
                    push_flash(
                        &session,
                        FlashLevel::Success,
                        "Your account has been created! You can now log in.",
                    )
                    .await
                    .map_err(session_err)?;
                    return Ok(Redirect::to("/login").into_response());
                }
                Err(AuthError::UserAlreadyExists) => {
                    vec![FieldError {
                        field: "email",
                        message: "An account with this email already exists.".to_owned(),
                    }]
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(errors) => errors,
    };

    let csrf_token = csrf::ensure_token(&session).await.map_err(session_err)?;
    let flashes = take_flashes(&session).await.map_err(session_err)?;

    Ok(RegisterTemplate {
        current_user: None,
        flashes,
        csrf_token,
        errors,
        username: form.username,
        email: form.email,
    }
    .into_response())
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page; logged-in users go home.
#[instrument(skip_all)]
pub async fn login_page(
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<Response> {
    if current_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let csrf_token = csrf::ensure_token(&session).await.map_err(session_err)?;
    let flashes = take_flashes(&session).await.map_err(session_err)?;

    Ok(LoginTemplate {
        current_user: None,
        flashes,
        csrf_token,
        errors: FieldErrors::new(),
        email: String::new(),
    }
    .into_response())
}

/// Handle the login form submission.
///
/// Failure is reported with one generic notice whether the email is unknown
/// or the password is wrong. Success stores the user in the session and
/// upgrades it to the long "remember" expiry.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<LoginSubmission>,
) -> Result<Response> {
    if current_user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if !csrf::verify_token(&session, &form.csrf_token)
        .await
        .map_err(session_err)?
    {
        return Err(AppError::BadRequest("invalid anti-forgery token".into()));
    }

    let errors = match form.validate() {
        Ok(valid) => {
            match AuthService::new(state.pool())
                .login(&valid.email, &valid.password)
                .await
            {
                Ok(user) => {
                    set_current_user(&session, &CurrentUser::from(&user))
                        .await
                        .map_err(session_err)?;
                    session.set_expiry(Some(remember_expiry()));
                    tracing::info!(user_id = %user.id, "login successful");
                    return Ok(Redirect::to("/").into_response());
                }
                Err(AuthError::InvalidCredentials) => {
                    // One wording for unknown email and wrong password
                    push_flash(
                        &session,
                        FlashLevel::Danger,
                        "Login unsuccessful. Please check email and password.",
                    )
                    .await
                    .map_err(session_err)?;
                    FieldErrors::new()
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(errors) => errors,
    };

    let csrf_token = csrf::ensure_token(&session).await.map_err(session_err)?;
    let flashes = take_flashes(&session).await.map_err(session_err)?;

    Ok(LoginTemplate {
        current_user: None,
        flashes,
        csrf_token,
        errors,
        email: form.email,
    }
    .into_response())
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout: drop the whole session and go home.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_user(&session).await.map_err(session_err)?;

    // Destroy the rest of the session state too
    session.flush().await.map_err(session_err)?;

    Ok(Redirect::to("/").into_response())
}
