//! Favorite-movie models stored per user.

use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// A favorite-movie entry embedded in a [`FavoritesDocument`].
///
/// Only `id` is interpreted by the gateway (removal filters on it). All
/// other fields ride along untouched, and set membership on add compares
/// the whole entry, extra fields included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMovie {
    /// Movie identifier used for removal
    pub id: i64,
    /// Whatever else the client sent with the movie (title, poster, ...)
    #[serde(flatten)]
    pub extra: Document,
}

/// Per-user favorites container, one document per `uid`.
///
/// Created lazily on the first add; a missing document reads as an empty
/// list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesDocument {
    /// Identity provider uid, unique key for the document
    pub uid: String,
    /// The favorite set, ordered by insertion
    #[serde(default)]
    pub movies: Vec<FavoriteMovie>,
}
