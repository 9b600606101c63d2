//! Domain service for account settings.

use thiserror::Error;

use crate::models::InvalidInput;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for SettingsError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for SettingsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait SettingsService: Send + Sync {
    /// Overwrites the display name of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidInput`] if the name is empty or too long.
    async fn update_name(&self, user_id: i32, name: &str) -> Result<String, SettingsError>;
}
