//! `SeaORM` implementation of the `AuthService` trait.

use crate::db::Store;
use crate::models::user::User;
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput);
        }

        let user = self
            .store
            .verify_user_credentials(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!(username = %user.username, "User logged in");
        Ok(user)
    }

    async fn session_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn owner(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.first_user().await?)
    }
}
