use axum::{
    Router,
    http::Uri,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, MovieService, SettingsService};
use crate::state::SharedState;

mod assets;
pub mod auth;
mod error;
pub mod movies;
pub mod pages;
pub mod session;
pub mod settings;

pub use error::WebError;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
    /// Session records live next to the watchlist tables.
    pub sessions: SqliteStore,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn movies(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn settings(&self) -> &Arc<dyn SettingsService> {
        &self.shared.settings_service
    }
}

pub async fn create_app_state(shared: Arc<SharedState>) -> anyhow::Result<Arc<AppState>> {
    let pool = shared.store.conn.get_sqlite_connection_pool().clone();
    let sessions = SqliteStore::new(pool);
    sessions.migrate().await?;

    Ok(Arc::new(AppState { shared, sessions }))
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared).await
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_layer = SessionManagerLayer::new(state.sessions.clone())
        .with_secure(server.secure_cookies)
        .with_http_only(true)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_ttl_minutes,
        )));

    let protected_routes = create_protected_router(state.clone());

    Router::new()
        .route("/", get(movies::index).post(movies::create))
        .route("/index", get(movies::index))
        .route("/user/{name}", get(movies::user_page))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/static/{*path}", get(assets::serve_static))
        .merge(protected_routes)
        .fallback(not_found)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/movie/edit/{id}",
            get(movies::edit_page).post(movies::update),
        )
        .route("/movie/delete/{id}", post(movies::delete))
        .route(
            "/settings",
            get(settings::settings_page).post(settings::update_settings),
        )
        .route("/logout", get(auth::logout))
        .route_layer(middleware::from_fn_with_state(state, auth::require_login))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    WebError::not_found("Page", uri.path())
}
