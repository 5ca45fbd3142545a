// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites management: per-user movie lists in the `Favorites` collection.

use crate::db::MongoDb;
use crate::error::AppError;
use crate::models::FavoriteMovie;

/// Mutates and reads a user's favorite-movie set.
///
/// Each operation maps to a single atomic store operation, so concurrent
/// mutations on the same uid cannot interleave.
#[derive(Clone)]
pub struct FavoritesService {
    db: MongoDb,
}

impl FavoritesService {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    /// Add a movie to the user's favorites. The document is created on
    /// first add; membership compares the whole entry.
    pub async fn add(&self, uid: &str, movie: &FavoriteMovie) -> Result<(), AppError> {
        self.db.add_favorite(uid, movie).await?;
        tracing::debug!(uid, movie_id = movie.id, "Favorite added");
        Ok(())
    }

    /// List the user's favorites; a user with no document has none.
    pub async fn list(&self, uid: &str) -> Result<Vec<FavoriteMovie>, AppError> {
        self.db.list_favorites(uid).await
    }

    /// Remove every favorite with the given movie id. Idempotent.
    pub async fn remove(&self, uid: &str, movie_id: i64) -> Result<(), AppError> {
        self.db.remove_favorite(uid, movie_id).await?;
        tracing::debug!(uid, movie_id, "Favorite removed");
        Ok(())
    }
}
