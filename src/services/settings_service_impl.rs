use crate::db::Store;
use crate::models::user::parse_display_name;
use crate::services::settings_service::{SettingsError, SettingsService};
use async_trait::async_trait;

pub struct SeaOrmSettingsService {
    store: Store,
}

impl SeaOrmSettingsService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsService for SeaOrmSettingsService {
    async fn update_name(&self, user_id: i32, name: &str) -> Result<String, SettingsError> {
        let name = parse_display_name(name)?;

        if !self.store.update_user_name(user_id, &name).await? {
            return Err(SettingsError::UserNotFound(user_id));
        }

        tracing::info!(user_id, "Display name updated");
        Ok(name)
    }
}
