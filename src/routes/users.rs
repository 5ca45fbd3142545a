// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration, credential, and session routes.

use crate::error::{AppError, Result};
use crate::routes::AckResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/RegistrarUsuario", post(register))
        .route("/ConseguirUsuario", get(list_users))
        .route("/ActualizarUsuario/{id}", put(update_user))
        .route("/EliminarUsuario/{id}", delete(delete_user))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub email: String,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
}

/// Register a new user against the identity provider and the store.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let record = state.users.register(&req.email, &req.password).await?;

    Ok(Json(RegisterResponse {
        email: record.email,
        subject_id: record.subject_id,
    }))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
}

/// List all user records.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| UserResponse {
                id: u.id.to_hex(),
                email: u.email,
                subject_id: u.subject_id,
            })
            .collect(),
    ))
}

// ─── Update / Delete ─────────────────────────────────────────

/// Update payload, allow-listed: unknown fields are rejected rather than
/// merged into the record.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Update a user's email and/or password.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<AckResponse>> {
    let id = parse_record_id(&id)?;

    state
        .users
        .update(id, req.email.as_deref(), req.password.as_deref())
        .await?;

    Ok(AckResponse::ok("Usuario actualizado"))
}

/// Delete a user's identity subject and record.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>> {
    let id = parse_record_id(&id)?;

    state.users.delete(id).await?;

    Ok(AckResponse::ok("Usuario eliminado"))
}

// ─── Sessions ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    #[serde(rename = "mongoId")]
    pub mongo_id: String,
}

/// Authenticate and return the subject and record identifiers.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let outcome = state.users.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        subject_id: outcome.subject_id,
        mongo_id: outcome.record_id.to_hex(),
    }))
}

/// End the caller's session (advisory).
async fn logout(State(state): State<Arc<AppState>>) -> Result<Json<AckResponse>> {
    state.users.logout().await?;
    Ok(AckResponse::ok("Sesión cerrada"))
}

fn parse_record_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid record id: {}", raw)))
}
