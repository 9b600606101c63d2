//! Domain service for authentication.
//!
//! Verifies login credentials against the single stored account and resolves
//! the user id kept in a session back to an account.

use thiserror::Error;

use crate::models::user::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid input")]
    InvalidInput,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] if either field is empty, and
    /// [`AuthError::InvalidCredentials`] if the username or password is wrong.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Looks up the user a session refers to. `None` if the account is gone.
    async fn session_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    /// The account whose display name heads every page.
    async fn owner(&self) -> Result<Option<User>, AuthError>;
}
