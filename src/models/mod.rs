// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod movie;
pub mod user;

pub use movie::{FavoriteMovie, FavoritesDocument};
pub use user::UserRecord;
