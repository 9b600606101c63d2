use crate::db::Store;
use crate::models::movie::{Movie, MovieInput};
use crate::services::movie_service::{MovieError, MovieService, Watchlist};
use async_trait::async_trait;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Watchlist, MovieError> {
        let movies = self.store.list_movies().await?;
        let owner_name = self.store.first_user().await?.map(|u| u.name);

        Ok(Watchlist { owner_name, movies })
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn create(&self, title: &str, year: &str) -> Result<Movie, MovieError> {
        let input = MovieInput::parse(title, year)?;
        Ok(self.store.add_movie(&input).await?)
    }

    async fn update(&self, id: i32, title: &str, year: &str) -> Result<Movie, MovieError> {
        if self.store.get_movie(id).await?.is_none() {
            return Err(MovieError::NotFound(id));
        }

        let input = MovieInput::parse(title, year)?;
        self.store
            .update_movie(id, &input)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        if self.store.remove_movie(id).await? {
            Ok(())
        } else {
            Err(MovieError::NotFound(id))
        }
    }
}
