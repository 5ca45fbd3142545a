// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User lifecycle coordination across the identity provider and the store.
//!
//! Every operation is a fixed-order sequence of adapter calls with defined
//! partial-failure behavior:
//! - registration creates the identity subject first and compensates by
//!   deleting it if the record insert fails;
//! - deletion removes the identity subject first, so the store never points
//!   at a deleted identity;
//! - login authenticates first and treats a missing record as a hard error.

use crate::db::MongoDb;
use crate::error::AppError;
use crate::models::UserRecord;
use crate::services::firebase::FirebaseAuth;
use mongodb::bson::oid::ObjectId;

/// Coordinates user records across the identity provider and the store.
#[derive(Clone)]
pub struct UserService {
    db: MongoDb,
    auth: FirebaseAuth,
}

/// Outcome of a successful login.
pub struct LoginOutcome {
    pub subject_id: String,
    pub record_id: ObjectId,
}

impl UserService {
    pub fn new(db: MongoDb, auth: FirebaseAuth) -> Self {
        Self { db, auth }
    }

    /// Register a new user: create the identity subject, then the record.
    ///
    /// If the record insert fails the subject is deleted again; a subject
    /// without a record must not survive registration.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserRecord, AppError> {
        let subject_id = self.auth.sign_up(email, password).await?;

        match self.db.insert_user(email, &subject_id).await {
            Ok(record) => {
                tracing::info!(subject_id = %subject_id, user_id = %record.id, "User registered");
                Ok(record)
            }
            Err(store_err) => {
                tracing::error!(
                    subject_id = %subject_id,
                    error = %store_err,
                    "Record insert failed after subject creation, compensating"
                );

                if let Err(comp_err) = self.auth.delete_account(&subject_id).await {
                    // The orphaned subject stays behind for manual reconciliation.
                    tracing::error!(
                        subject_id = %subject_id,
                        error = %comp_err,
                        "Compensating subject deletion failed"
                    );
                }

                Err(store_err)
            }
        }
    }

    /// List all user records.
    pub async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        self.db.list_users().await
    }

    /// Update a user's email and/or password.
    ///
    /// The provider is updated before the record; only the email is
    /// persisted locally (passwords never touch the store).
    pub async fn update(
        &self,
        id: ObjectId,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<(), AppError> {
        let record = self.require_record(id).await?;

        if email.is_some() || password.is_some() {
            self.auth
                .update_account(&record.subject_id, email, password)
                .await?;
        }

        if let Some(email) = email {
            self.db.set_user_email(id, email).await?;
        }

        tracing::info!(user_id = %id, "User updated");
        Ok(())
    }

    /// Delete a user: identity subject first, then the record.
    pub async fn delete(&self, id: ObjectId) -> Result<(), AppError> {
        let record = self.require_record(id).await?;

        // Provider first: a failure here leaves both sides intact.
        self.auth.delete_account(&record.subject_id).await?;
        self.db.delete_user(id).await?;

        tracing::info!(user_id = %id, subject_id = %record.subject_id, "User deleted");
        Ok(())
    }

    /// Authenticate and resolve the matching record.
    ///
    /// A subject with no record means the provider and the store have
    /// drifted; surfaced as not-found, not auto-healed.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let subject_id = self.auth.sign_in(email, password).await?;

        let record = self
            .db
            .get_user_by_subject(&subject_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(subject_id = %subject_id, "Identity exists but no record found");
                AppError::NotFound(format!("No record for subject {}", subject_id))
            })?;

        Ok(LoginOutcome {
            subject_id,
            record_id: record.id,
        })
    }

    /// End the caller's session. Advisory; there is no server-side session
    /// state to invalidate.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.auth.sign_out().await
    }

    async fn require_record(&self, id: ObjectId) -> Result<UserRecord, AppError> {
        self.db
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
