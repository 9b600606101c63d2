//! Domain service for the watchlist itself.

use thiserror::Error;

use crate::models::InvalidInput;
use crate::models::movie::Movie;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie {0} not found")]
    NotFound(i32),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Everything the list page needs.
#[derive(Debug, Clone)]
pub struct Watchlist {
    pub owner_name: Option<String>,
    pub movies: Vec<Movie>,
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// All movies in insertion order plus the owner's display name.
    async fn list(&self) -> Result<Watchlist, MovieError>;

    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::InvalidInput`] if title or year is empty or too long.
    async fn create(&self, title: &str, year: &str) -> Result<Movie, MovieError>;

    /// Unknown ids are reported before the input is validated.
    async fn update(&self, id: i32, title: &str, year: &str) -> Result<Movie, MovieError>;

    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
