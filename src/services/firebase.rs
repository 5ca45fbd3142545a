// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity Toolkit client for account management.
//!
//! Handles:
//! - Account creation (sign-up)
//! - Password sign-in
//! - Email/password updates
//! - Account deletion

use crate::error::AppError;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Identity provider client.
#[derive(Clone)]
pub struct FirebaseAuth {
    backend: AuthBackend,
}

#[derive(Clone)]
enum AuthBackend {
    Http {
        http: reqwest::Client,
        base_url: String,
        api_key: String,
    },
    /// In-memory accounts for tests. Rejects duplicate emails and short
    /// passwords the way the hosted provider does.
    Memory(Arc<MemAccounts>),
}

#[derive(Default)]
struct MemAccounts {
    /// uid -> (email, password)
    accounts: DashMap<String, (String, String)>,
    next_uid: AtomicU64,
}

impl MemAccounts {
    fn mint_uid(&self) -> String {
        let n = self.next_uid.fetch_add(1, Ordering::Relaxed);
        format!("mem-uid-{:04}", n)
    }
}

impl FirebaseAuth {
    /// Create a client for the hosted Identity Toolkit API.
    pub fn new(api_key: String) -> Self {
        Self {
            backend: AuthBackend::Http {
                http: reqwest::Client::new(),
                base_url: IDENTITY_TOOLKIT_URL.to_string(),
                api_key,
            },
        }
    }

    /// Create an in-memory provider for testing.
    pub fn new_in_memory() -> Self {
        Self {
            backend: AuthBackend::Memory(Arc::new(MemAccounts::default())),
        }
    }

    /// Create an account, returning the provider's uid for the new subject.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<String, AppError> {
        match &self.backend {
            AuthBackend::Http {
                http,
                base_url,
                api_key,
            } => {
                let url = format!("{}/accounts:signUp?key={}", base_url, api_key);
                let body = serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                });

                let response = http
                    .post(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| AppError::Identity(e.to_string()))?;

                let account: AccountResponse =
                    check_response_json(response, AppError::Identity).await?;
                Ok(account.local_id)
            }
            AuthBackend::Memory(mem) => {
                if password.len() < 6 {
                    return Err(AppError::Identity(
                        "WEAK_PASSWORD : Password should be at least 6 characters".to_string(),
                    ));
                }
                if mem.accounts.iter().any(|a| a.value().0 == email) {
                    return Err(AppError::Identity("EMAIL_EXISTS".to_string()));
                }

                let uid = mem.mint_uid();
                mem.accounts
                    .insert(uid.clone(), (email.to_string(), password.to_string()));
                Ok(uid)
            }
        }
    }

    /// Authenticate with email and password, returning the subject uid.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, AppError> {
        match &self.backend {
            AuthBackend::Http {
                http,
                base_url,
                api_key,
            } => {
                let url = format!("{}/accounts:signInWithPassword?key={}", base_url, api_key);
                let body = serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                });

                let response = http
                    .post(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| AppError::Unauthorized(e.to_string()))?;

                let account: AccountResponse =
                    check_response_json(response, AppError::Unauthorized).await?;
                Ok(account.local_id)
            }
            AuthBackend::Memory(mem) => mem
                .accounts
                .iter()
                .find(|a| a.value().0 == email && a.value().1 == password)
                .map(|a| a.key().clone())
                .ok_or_else(|| {
                    AppError::Unauthorized("INVALID_LOGIN_CREDENTIALS".to_string())
                }),
        }
    }

    /// Update email and/or password on an existing account.
    pub async fn update_account(
        &self,
        uid: &str,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<(), AppError> {
        match &self.backend {
            AuthBackend::Http {
                http,
                base_url,
                api_key,
            } => {
                let url = format!("{}/accounts:update?key={}", base_url, api_key);

                let mut body = serde_json::Map::new();
                body.insert("localId".to_string(), uid.into());
                if let Some(email) = email {
                    body.insert("email".to_string(), email.into());
                }
                if let Some(password) = password {
                    body.insert("password".to_string(), password.into());
                }

                let response = http
                    .post(&url)
                    .json(&serde_json::Value::Object(body))
                    .send()
                    .await
                    .map_err(|e| AppError::Identity(e.to_string()))?;

                check_response(response, AppError::Identity).await
            }
            AuthBackend::Memory(mem) => {
                if let Some(password) = password {
                    if password.len() < 6 {
                        return Err(AppError::Identity(
                            "WEAK_PASSWORD : Password should be at least 6 characters"
                                .to_string(),
                        ));
                    }
                }

                let mut account = mem
                    .accounts
                    .get_mut(uid)
                    .ok_or_else(|| AppError::Identity("USER_NOT_FOUND".to_string()))?;
                if let Some(email) = email {
                    account.0 = email.to_string();
                }
                if let Some(password) = password {
                    account.1 = password.to_string();
                }
                Ok(())
            }
        }
    }

    /// Delete an account.
    pub async fn delete_account(&self, uid: &str) -> Result<(), AppError> {
        match &self.backend {
            AuthBackend::Http {
                http,
                base_url,
                api_key,
            } => {
                let url = format!("{}/accounts:delete?key={}", base_url, api_key);
                let body = serde_json::json!({ "localId": uid });

                let response = http
                    .post(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| AppError::Identity(e.to_string()))?;

                check_response(response, AppError::Identity).await
            }
            AuthBackend::Memory(mem) => {
                mem.accounts
                    .remove(uid)
                    .ok_or_else(|| AppError::Identity("USER_NOT_FOUND".to_string()))?;
                Ok(())
            }
        }
    }

    /// End the current session.
    ///
    /// There is no server-side session registry in this flow; sign-out is
    /// advisory and always succeeds.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        tracing::debug!("Sign-out requested; nothing to revoke");
        Ok(())
    }
}

/// Success payload common to signUp and signInWithPassword.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
}

/// Error body shape of the Identity Toolkit API.
#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Check response status, mapping provider failures through `to_err` with
/// the provider's own message (e.g. `EMAIL_EXISTS`).
async fn check_response<F>(response: reqwest::Response, to_err: F) -> Result<(), AppError>
where
    F: Fn(String) -> AppError,
{
    if response.status().is_success() {
        return Ok(());
    }
    Err(to_err(error_message(response).await))
}

/// Check response status and parse the JSON body.
async fn check_response_json<T, F>(response: reqwest::Response, to_err: F) -> Result<T, AppError>
where
    T: for<'de> Deserialize<'de>,
    F: Fn(String) -> AppError,
{
    if !response.status().is_success() {
        return Err(to_err(error_message(response).await));
    }

    response.json().await.map_err(|e| to_err(e.to_string()))
}

/// Extract the provider's error message, falling back to the raw body.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body))
}
