use crate::entities::{movies, prelude::*};
use crate::models::movie::{Movie, MovieInput};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Repository for watchlist entries
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: movies::Model) -> Movie {
        Movie {
            id: model.id,
            title: model.title,
            year: model.year,
        }
    }

    /// All movies in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let row = Movies::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Movies::find().count(&self.conn).await?)
    }

    pub async fn add(&self, input: &MovieInput) -> Result<Movie> {
        let active = movies::ActiveModel {
            title: Set(input.title.clone()),
            year: Set(input.year.clone()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;
        info!("Added movie {}: {} ({})", model.id, model.title, model.year);

        Ok(Self::map_model(model))
    }

    /// Inserts all entries in one transaction.
    pub async fn add_many(&self, inputs: &[MovieInput]) -> Result<usize> {
        let txn = self.conn.begin().await?;

        for input in inputs {
            movies::ActiveModel {
                title: Set(input.title.clone()),
                year: Set(input.year.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(inputs.len())
    }

    /// Returns `None` if the movie does not exist.
    pub async fn update(&self, id: i32, input: &MovieInput) -> Result<Option<Movie>> {
        let Some(model) = Movies::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: movies::ActiveModel = model.into();
        active.title = Set(input.title.clone());
        active.year = Set(input.year.clone());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update movie")?;

        Ok(Some(Self::map_model(model)))
    }

    /// Returns `false` if nothing was deleted.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Movies::delete_by_id(id).exec(&self.conn).await?;
        if result.rows_affected > 0 {
            info!("Removed movie {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
