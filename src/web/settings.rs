use axum::{
    Extension, Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::session::{self, member_page_context};
use super::{AppState, WebError, pages};
use crate::models::user::User;
use crate::services::SettingsError;

#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub name: String,
}

impl From<SettingsError> for WebError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::UserNotFound(id) => Self::not_found("User", id),
            SettingsError::InvalidInput(e) => Self::BadRequest(e.to_string()),
            SettingsError::Database(msg) | SettingsError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /settings
pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    session: Session,
) -> Result<Html<String>, WebError> {
    let ctx = member_page_context(&state, &session).await?;
    Ok(Html(pages::settings(&ctx, &user.name)))
}

/// POST /settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, WebError> {
    match state.settings().update_name(user.id, &form.name).await {
        Ok(_) => {
            session::flash(&session, "Settings updated.").await?;
            Ok(Redirect::to("/"))
        }
        Err(SettingsError::InvalidInput(_)) => {
            session::flash(&session, "Invalid input.").await?;
            Ok(Redirect::to("/settings"))
        }
        Err(e) => Err(e.into()),
    }
}
