// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod favorites;
pub mod firebase;
pub mod tmdb;
pub mod users;

pub use favorites::FavoritesService;
pub use firebase::FirebaseAuth;
pub use tmdb::TmdbClient;
pub use users::{LoginOutcome, UserService};
