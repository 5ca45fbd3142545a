// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cartelera API Server
//!
//! Thin gateway fronting the user database, the identity provider, and the
//! TMDB metadata API for the movie-app frontend.

use cartelera_api::{
    config::Config,
    db::MongoDb,
    services::{FavoritesService, FirebaseAuth, TmdbClient, UserService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Cartelera API");

    // An unreachable database is fatal; nothing works without the store.
    let db = MongoDb::new(&config.mongo_uri, &config.mongo_db)
        .await
        .expect("Failed to connect to MongoDB");

    let auth = FirebaseAuth::new(config.firebase_api_key.clone());
    let tmdb = TmdbClient::new(config.tmdb_api_key.clone());

    let users = UserService::new(db.clone(), auth.clone());
    let favorites = FavoritesService::new(db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        auth,
        users,
        favorites,
        tmdb,
    });

    // Build router
    let app = cartelera_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cartelera_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
