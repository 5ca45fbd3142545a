// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use cartelera_api::config::Config;
use cartelera_api::db::MongoDb;
use cartelera_api::routes::create_router;
use cartelera_api::services::{FavoritesService, FirebaseAuth, TmdbClient, UserService};
use cartelera_api::AppState;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over in-memory adapter backends.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(MongoDb::new_in_memory())
}

/// Create a test app whose database errors on every operation while the
/// identity provider keeps working. Exercises the partial-failure paths of
/// the dual writes.
#[allow(dead_code)]
pub fn create_test_app_offline_db() -> (axum::Router, Arc<AppState>) {
    build_app(MongoDb::new_offline())
}

fn build_app(db: MongoDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let auth = FirebaseAuth::new_in_memory();
    let tmdb = TmdbClient::new(config.tmdb_api_key.clone());

    let users = UserService::new(db.clone(), auth.clone());
    let favorites = FavoritesService::new(db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        auth,
        users,
        favorites,
        tmdb,
    });

    (create_router(state.clone()), state)
}

/// Send a request and return the status plus the parsed JSON body
/// (`Null` when the body is empty).
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        // Most bodies are JSON, but framework-level extractor rejections
        // (e.g. a `deny_unknown_fields` failure) come back as plain text.
        // Surface those as a string instead of panicking the harness.
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}
