use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, MovieService, SeaOrmAuthService, SeaOrmMovieService, SeaOrmSettingsService,
    SettingsService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub movie_service: Arc<dyn MovieService>,

    pub settings_service: Arc<dyn SettingsService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Build the services on top of an already opened store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        Self {
            config: Arc::new(config),
            auth_service: Arc::new(SeaOrmAuthService::new(store.clone())),
            movie_service: Arc::new(SeaOrmMovieService::new(store.clone())),
            settings_service: Arc::new(SeaOrmSettingsService::new(store.clone())),
            store,
        }
    }
}
