// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Movie metadata pass-through routes.

use crate::error::{AppError, Result};
use crate::services::tmdb::{TmdbMovieSummary, TmdbVideoList};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/PeliculasPopulares", get(popular))
        .route("/Pelicula/{id}", get(movie_detail))
        .route("/BuscarPelicula", get(search))
}

// ─── Response Shapes ─────────────────────────────────────────

#[derive(Serialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub score: f64,
    pub release_date: String,
    pub poster: Option<String>,
}

#[derive(Serialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub score: f64,
    pub release_date: String,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub trailer: Option<String>,
}

fn image_url(path: Option<String>) -> Option<String> {
    path.map(|p| format!("{}{}", IMAGE_BASE_URL, p))
}

/// First YouTube trailer attached to the movie, if any.
fn first_trailer(videos: &TmdbVideoList) -> Option<String> {
    videos
        .results
        .iter()
        .find(|v| v.site == "YouTube" && v.kind == "Trailer")
        .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
}

fn to_summary(movie: TmdbMovieSummary) -> MovieSummary {
    MovieSummary {
        id: movie.id,
        title: movie.title,
        overview: movie.overview,
        score: movie.vote_average,
        release_date: movie.release_date,
        poster: image_url(movie.poster_path),
    }
}

// ─── Handlers ────────────────────────────────────────────────

/// Current popular movies.
async fn popular(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MovieSummary>>> {
    let list = state.tmdb.popular().await?;
    Ok(Json(list.results.into_iter().map(to_summary).collect()))
}

#[derive(Deserialize)]
struct SearchQuery {
    query: Option<String>,
}

/// Free-text movie search.
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<MovieSummary>>> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'query' parameter".to_string()))?;

    let list = state.tmdb.search(&query).await?;
    Ok(Json(list.results.into_iter().map(to_summary).collect()))
}

/// Movie details plus trailer.
///
/// Details and videos are independent upstream calls, fetched concurrently;
/// if either fails the whole response fails (no partial data).
async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDetail>> {
    let (details, videos) = tokio::try_join!(
        state.tmdb.movie_details(id),
        state.tmdb.movie_videos(id),
    )?;

    Ok(Json(MovieDetail {
        id: details.id,
        title: details.title,
        overview: details.overview,
        score: details.vote_average,
        release_date: details.release_date,
        runtime: details.runtime,
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        poster: image_url(details.poster_path),
        backdrop: image_url(details.backdrop_path),
        trailer: first_trailer(&videos),
    }))
}
