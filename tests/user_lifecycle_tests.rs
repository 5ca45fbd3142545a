// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User lifecycle integration tests: registration, login, update, delete.

use axum::http::StatusCode;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_register_then_login_returns_same_ids() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    let subject_id = body["subjectId"].as_str().unwrap().to_string();

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/login",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subjectId"], subject_id.as_str());

    // The record id returned by login is the stored record's id.
    let (status, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["id"], body["mongoId"]);
    assert_eq!(users[0]["subjectId"], subject_id.as_str());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let (app, _state) = common::create_test_app();

    common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/login",
        Some(json!({"email": "alice@example.com", "password": "wrong!!"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_register_duplicate_email_fails_without_record() {
    let (app, _state) = common::create_test_app();

    common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret2"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("EMAIL_EXISTS"));

    // Only the first registration produced a record.
    let (_, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_weak_password_creates_nothing() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "bob@example.com", "password": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("WEAK_PASSWORD"));

    let (_, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_changes_credentials_and_record_email() {
    let (app, _state) = common::create_test_app();

    common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    let (_, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    let id = users[0]["id"].as_str().unwrap().to_string();

    let (status, body) = common::send_json(
        &app,
        "PUT",
        &format!("/ActualizarUsuario/{}", id),
        Some(json!({"email": "alicia@example.com", "password": "secret2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // New credentials work, old ones do not.
    let (status, _) = common::send_json(
        &app,
        "POST",
        "/login",
        Some(json!({"email": "alicia@example.com", "password": "secret2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::send_json(
        &app,
        "POST",
        "/login",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The record's email field was rewritten.
    let (_, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    assert_eq!(users[0]["email"], "alicia@example.com");
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let (app, _state) = common::create_test_app();

    let (status, _) = common::send_json(
        &app,
        "PUT",
        &format!("/ActualizarUsuario/{}", ObjectId::new().to_hex()),
        Some(json!({"email": "x@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_unknown_fields() {
    let (app, _state) = common::create_test_app();

    common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    let (_, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    let id = users[0]["id"].as_str().unwrap().to_string();

    // Payload fields outside the allow-list never reach the record.
    let (status, _) = common::send_json(
        &app,
        "PUT",
        &format!("/ActualizarUsuario/{}", id),
        Some(json!({"Contrasena": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_removes_record_and_subject() {
    let (app, _state) = common::create_test_app();

    common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    let (_, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    let id = users[0]["id"].as_str().unwrap().to_string();

    let (status, body) =
        common::send_json(&app, "DELETE", &format!("/EliminarUsuario/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, users) = common::send_json(&app, "GET", "/ConseguirUsuario", None).await;
    assert!(users.as_array().unwrap().is_empty());

    // The identity subject is gone too: the login fails authentication.
    let (status, _) = common::send_json(
        &app,
        "POST",
        "/login",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_missing_user_leaves_identities_untouched() {
    let (app, _state) = common::create_test_app();

    common::send_json(
        &app,
        "POST",
        "/RegistrarUsuario",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;

    let (status, _) = common::send_json(
        &app,
        "DELETE",
        &format!("/EliminarUsuario/{}", ObjectId::new().to_hex()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The registered user's subject was not deleted.
    let (status, _) = common::send_json(
        &app,
        "POST",
        "/login",
        Some(json!({"email": "alice@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_missing_record_is_hard_error() {
    let (app, state) = common::create_test_app();

    // A subject that exists in the provider but has no store record
    // (the two systems drifted).
    state
        .auth
        .sign_up("ghost@example.com", "secret1")
        .await
        .unwrap();

    let (status, _) = common::send_json(
        &app,
        "POST",
        "/login",
        Some(json!({"email": "ghost@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_always_acknowledges() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send_json(&app, "POST", "/logout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_invalid_record_id_is_bad_request() {
    let (app, _state) = common::create_test_app();

    let (status, _) =
        common::send_json(&app, "DELETE", "/EliminarUsuario/not-a-hex-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
