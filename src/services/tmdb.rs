// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TMDB API client for movie metadata.
//!
//! Read-only pass-through: the gateway reshapes responses but never caches
//! or mutates them.

use crate::error::AppError;
use serde::Deserialize;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client.
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: TMDB_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Get detailed metadata for a movie.
    pub async fn movie_details(&self, movie_id: i64) -> Result<TmdbMovieDetails, AppError> {
        let url = format!("{}/movie/{}", self.base_url, movie_id);
        self.get_json(&url, &[]).await
    }

    /// Get the videos (trailers, teasers) attached to a movie.
    pub async fn movie_videos(&self, movie_id: i64) -> Result<TmdbVideoList, AppError> {
        let url = format!("{}/movie/{}/videos", self.base_url, movie_id);
        self.get_json(&url, &[]).await
    }

    /// Get the current popular-movies list.
    pub async fn popular(&self) -> Result<TmdbMovieList, AppError> {
        let url = format!("{}/movie/popular", self.base_url);
        self.get_json(&url, &[]).await
    }

    /// Free-text movie search.
    pub async fn search(&self, query: &str) -> Result<TmdbMovieList, AppError> {
        let url = format!("{}/search/movie", self.base_url);
        self.get_json(&url, &[("query", query)]).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::MovieApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::MovieApi(format!("HTTP {}: {}", status, body)));
        }

        response.json().await.map_err(|e| AppError::MovieApi(e.to_string()))
    }
}

// ─── Wire Shapes ─────────────────────────────────────────────────

/// Detailed movie metadata as returned by `/movie/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

/// Paged movie list (popular, search results).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieList {
    #[serde(default)]
    pub results: Vec<TmdbMovieSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoList {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}
