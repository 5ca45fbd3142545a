// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites routes: per-user favorite-movie lists.

use crate::error::Result;
use crate::models::FavoriteMovie;
use crate::routes::AckResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/AddFavoritos/{uid}/agregar", post(add_favorite))
        .route("/GetFavoritos/{uid}", get(list_favorites))
        .route("/DeleteFavoritos/{uid}/{pelicula_id}", delete(remove_favorite))
}

/// Add a movie to the user's favorites.
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Json(movie): Json<FavoriteMovie>,
) -> Result<Json<AckResponse>> {
    state.favorites.add(&uid, &movie).await?;
    Ok(AckResponse::ok("Favorito agregado"))
}

/// List the user's favorites; `[]` when the user has none.
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<FavoriteMovie>>> {
    let movies = state.favorites.list(&uid).await?;
    Ok(Json(movies))
}

/// Remove every favorite with the given movie id. Idempotent.
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((uid, pelicula_id)): Path<(String, i64)>,
) -> Result<Json<AckResponse>> {
    state.favorites.remove(&uid, pelicula_id).await?;
    Ok(AckResponse::ok("Favorito eliminado"))
}
