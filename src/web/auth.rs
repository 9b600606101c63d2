use axum::{
    Extension, Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::session::{self, current_user, page_context};
use super::{AppState, WebError, pages};
use crate::models::user::User;
use crate::services::AuthError;

pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput => Self::BadRequest("Invalid input".to_string()),
            AuthError::InvalidCredentials => {
                Self::BadRequest("Invalid username or password".to_string())
            }
            AuthError::Database(msg) | AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Lets the request through when the session belongs to an existing user and
/// makes that [`User`] available as an extension. Otherwise redirects to the
/// login page.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    if let Some(user) = current_user(&state, &session).await? {
        request.extensions_mut().insert(user);
        return Ok(next.run(request).await);
    }

    session::flash(&session, LOGIN_REQUIRED).await?;
    Ok(Redirect::to("/login").into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, WebError> {
    let ctx = page_context(&state, &session).await?;
    Ok(Html(pages::login(&ctx)))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, WebError> {
    match state.auth().login(&form.username, &form.password).await {
        Ok(user) => {
            session::log_in(&session, user.id).await?;
            session::flash(&session, "Login success.").await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::InvalidInput) => {
            session::flash(&session, "Invalid input.").await?;
            Ok(Redirect::to("/login"))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Failed login attempt");
            session::flash(&session, "Invalid username or password.").await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(
    Extension(user): Extension<User>,
    session: Session,
) -> Result<Redirect, WebError> {
    session::log_out(&session).await?;
    session::flash(&session, "Goodbye.").await?;
    tracing::info!(username = %user.username, "User logged out");
    Ok(Redirect::to("/"))
}
