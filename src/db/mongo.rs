// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identity-linked records)
//! - Favorites (per-uid embedded movie lists)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{FavoriteMovie, FavoritesDocument, UserRecord};
use dashmap::DashMap;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use std::sync::Arc;

/// MongoDB database client.
#[derive(Clone)]
pub struct MongoDb {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    /// Real driver connection.
    Mongo(mongodb::Database),
    /// In-memory store for tests, mirroring the driver's update semantics.
    Memory(Arc<MemStore>),
    /// No connection; every operation errors.
    Offline,
}

#[derive(Default)]
struct MemStore {
    users: DashMap<ObjectId, UserRecord>,
    favorites: DashMap<String, Vec<FavoriteMovie>>,
}

impl MongoDb {
    /// Connect to MongoDB and ping the deployment.
    ///
    /// A failure here is fatal for the process: the gateway has nothing to
    /// serve without its store.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let client = mongodb::Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {}", e)))?;
        let db = client.database(db_name);

        // The driver connects lazily; ping so a bad deployment surfaces at
        // startup instead of on the first request.
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::Database(format!("MongoDB ping failed: {}", e)))?;

        tracing::info!(db = db_name, "Connected to MongoDB");

        Ok(Self {
            backend: Backend::Mongo(db),
        })
    }

    /// Create an in-memory database for testing.
    ///
    /// Implements the same find/insert/update semantics as the driver-backed
    /// operations, including `$addToSet` whole-entry equality.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemStore::default())),
        }
    }

    /// Create a disconnected database for testing failure paths.
    ///
    /// All operations return a database error.
    pub fn new_offline() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline_err() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user record by its store identifier.
    pub async fn get_user(&self, id: ObjectId) -> Result<Option<UserRecord>, AppError> {
        match &self.backend {
            Backend::Mongo(db) => db
                .collection::<UserRecord>(collections::USERS)
                .find_one(doc! { "_id": id })
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(mem) => Ok(mem.users.get(&id).map(|r| r.value().clone())),
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    /// Get a user record by identity subject id.
    pub async fn get_user_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        match &self.backend {
            Backend::Mongo(db) => db
                .collection::<UserRecord>(collections::USERS)
                .find_one(doc! { "subjectId": subject_id })
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(mem) => Ok(mem
                .users
                .iter()
                .find(|r| r.value().subject_id == subject_id)
                .map(|r| r.value().clone())),
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    /// List all user records.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        match &self.backend {
            Backend::Mongo(db) => {
                let cursor = db
                    .collection::<UserRecord>(collections::USERS)
                    .find(doc! {})
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                cursor
                    .try_collect()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
            Backend::Memory(mem) => Ok(mem.users.iter().map(|r| r.value().clone()).collect()),
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    /// Insert a new user record, generating its identifier client-side.
    pub async fn insert_user(&self, email: &str, subject_id: &str) -> Result<UserRecord, AppError> {
        let record = UserRecord {
            id: ObjectId::new(),
            email: email.to_string(),
            subject_id: subject_id.to_string(),
        };

        match &self.backend {
            Backend::Mongo(db) => {
                db.collection::<UserRecord>(collections::USERS)
                    .insert_one(&record)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(record)
            }
            Backend::Memory(mem) => {
                mem.users.insert(record.id, record.clone());
                Ok(record)
            }
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    /// Update the email on a user record.
    pub async fn set_user_email(&self, id: ObjectId, email: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Mongo(db) => {
                db.collection::<UserRecord>(collections::USERS)
                    .update_one(doc! { "_id": id }, doc! { "$set": { "email": email } })
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(mem) => {
                if let Some(mut record) = mem.users.get_mut(&id) {
                    record.email = email.to_string();
                }
                Ok(())
            }
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    /// Delete a user record.
    pub async fn delete_user(&self, id: ObjectId) -> Result<(), AppError> {
        match &self.backend {
            Backend::Mongo(db) => {
                db.collection::<UserRecord>(collections::USERS)
                    .delete_one(doc! { "_id": id })
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(mem) => {
                mem.users.remove(&id);
                Ok(())
            }
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    // ─── Favorites Operations ────────────────────────────────────

    /// Add a movie to a user's favorites.
    ///
    /// Upserts the per-uid document; `$addToSet` gives set semantics on the
    /// whole entry, so the same movie with any field changed is appended as
    /// a distinct element.
    pub async fn add_favorite(&self, uid: &str, movie: &FavoriteMovie) -> Result<(), AppError> {
        match &self.backend {
            Backend::Mongo(db) => {
                let entry = mongodb::bson::to_bson(movie)
                    .map_err(|e| AppError::Database(e.to_string()))?;
                db.collection::<FavoritesDocument>(collections::FAVORITES)
                    .update_one(
                        doc! { "uid": uid },
                        doc! { "$addToSet": { "movies": entry } },
                    )
                    .upsert(true)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(mem) => {
                let mut movies = mem.favorites.entry(uid.to_string()).or_default();
                if !movies.contains(movie) {
                    movies.push(movie.clone());
                }
                Ok(())
            }
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    /// List a user's favorites. A missing document reads as an empty list.
    pub async fn list_favorites(&self, uid: &str) -> Result<Vec<FavoriteMovie>, AppError> {
        match &self.backend {
            Backend::Mongo(db) => {
                let document = db
                    .collection::<FavoritesDocument>(collections::FAVORITES)
                    .find_one(doc! { "uid": uid })
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(document.map(|d| d.movies).unwrap_or_default())
            }
            Backend::Memory(mem) => Ok(mem
                .favorites
                .get(uid)
                .map(|m| m.value().clone())
                .unwrap_or_default()),
            Backend::Offline => Err(Self::offline_err()),
        }
    }

    /// Remove every favorite whose movie id matches. Idempotent; succeeds
    /// even when no entry matches or no document exists.
    pub async fn remove_favorite(&self, uid: &str, movie_id: i64) -> Result<(), AppError> {
        match &self.backend {
            Backend::Mongo(db) => {
                db.collection::<FavoritesDocument>(collections::FAVORITES)
                    .update_one(
                        doc! { "uid": uid },
                        doc! { "$pull": { "movies": { "id": movie_id } } },
                    )
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(mem) => {
                if let Some(mut movies) = mem.favorites.get_mut(uid) {
                    movies.retain(|m| m.id != movie_id);
                }
                Ok(())
            }
            Backend::Offline => Err(Self::offline_err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> FavoriteMovie {
        FavoriteMovie {
            id,
            extra: doc! { "title": title },
        }
    }

    #[tokio::test]
    async fn test_add_favorite_dedups_identical_entries() {
        let db = MongoDb::new_in_memory();

        db.add_favorite("u1", &movie(603, "The Matrix")).await.unwrap();
        db.add_favorite("u1", &movie(603, "The Matrix")).await.unwrap();

        let movies = db.list_favorites("u1").await.unwrap();
        assert_eq!(movies.len(), 1);
    }

    #[tokio::test]
    async fn test_add_favorite_keeps_entries_differing_in_any_field() {
        let db = MongoDb::new_in_memory();

        db.add_favorite("u1", &movie(603, "The Matrix")).await.unwrap();
        db.add_favorite("u1", &movie(603, "The Matrix Reloaded"))
            .await
            .unwrap();

        let movies = db.list_favorites("u1").await.unwrap();
        assert_eq!(movies.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_favorite_pulls_every_matching_id() {
        let db = MongoDb::new_in_memory();

        db.add_favorite("u1", &movie(603, "The Matrix")).await.unwrap();
        db.add_favorite("u1", &movie(603, "The Matrix Reloaded"))
            .await
            .unwrap();
        db.add_favorite("u1", &movie(550, "Fight Club")).await.unwrap();

        db.remove_favorite("u1", 603).await.unwrap();

        let movies = db.list_favorites("u1").await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 550);
    }

    #[tokio::test]
    async fn test_missing_favorites_document_reads_as_empty() {
        let db = MongoDb::new_in_memory();

        let movies = db.list_favorites("nobody").await.unwrap();
        assert!(movies.is_empty());

        // Removal against a missing document is a no-op, not an error.
        db.remove_favorite("nobody", 603).await.unwrap();
    }

    #[tokio::test]
    async fn test_offline_backend_errors_every_operation() {
        let db = MongoDb::new_offline();

        assert!(db.list_users().await.is_err());
        assert!(db.insert_user("a@b.c", "uid-1").await.is_err());
        assert!(db.list_favorites("u1").await.is_err());
    }
}
