// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Cartelera: backend gateway for the movie app
//!
//! This crate provides the REST API that fronts the user database, the
//! identity provider, and the TMDB metadata API.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::MongoDb;
use services::{FavoritesService, FirebaseAuth, TmdbClient, UserService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MongoDb,
    pub auth: FirebaseAuth,
    pub users: UserService,
    pub favorites: FavoritesService,
    pub tmdb: TmdbClient,
}
