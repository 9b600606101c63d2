use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::session::{self, current_user, member_page_context, page_context_with_owner};
use super::{AppState, WebError, pages};
use crate::services::MovieError;

#[derive(Debug, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
}

impl From<MovieError> for WebError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => Self::not_found("Movie", id),
            MovieError::InvalidInput(e) => Self::BadRequest(e.to_string()),
            MovieError::Database(msg) | MovieError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// Non-numeric ids cannot name a movie, so they are a 404 rather than a 400.
fn parse_movie_id(raw: &str) -> Result<i32, WebError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| WebError::not_found("Movie", raw))
}

/// GET / and GET /index
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, WebError> {
    let watchlist = state.movies().list().await?;
    let ctx = page_context_with_owner(&state, &session, watchlist.owner_name).await?;
    Ok(Html(pages::index(&ctx, &watchlist.movies)))
}

/// POST /
///
/// Guests are sent back to the list without touching the store.
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, WebError> {
    if current_user(&state, &session).await?.is_none() {
        return Ok(Redirect::to("/"));
    }

    match state.movies().create(&form.title, &form.year).await {
        Ok(_) => session::flash(&session, "Item created.").await?,
        Err(MovieError::InvalidInput(e)) => {
            tracing::debug!("Rejected new movie: {e}");
            session::flash(&session, "Invalid input.").await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_movie_id(&id)?;
    let movie = state.movies().get(id).await?;
    let ctx = member_page_context(&state, &session).await?;
    Ok(Html(pages::edit(&ctx, &movie)))
}

/// POST /movie/edit/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, WebError> {
    let id = parse_movie_id(&id)?;

    match state.movies().update(id, &form.title, &form.year).await {
        Ok(_) => {
            session::flash(&session, "Item updated.").await?;
            Ok(Redirect::to("/"))
        }
        Err(MovieError::InvalidInput(e)) => {
            tracing::debug!(id, "Rejected movie update: {e}");
            session::flash(&session, "Invalid input.").await?;
            Ok(Redirect::to(&format!("/movie/edit/{id}")))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /movie/delete/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_movie_id(&id)?;
    state.movies().delete(id).await?;
    session::flash(&session, "Item deleted.").await?;
    Ok(Redirect::to("/"))
}

/// GET /user/{name}
pub async fn user_page(Path(name): Path<String>) -> String {
    format!("User : {name}")
}
