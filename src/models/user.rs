//! User model for storage and API.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User record stored in the `Users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned identifier (generated client-side at insert)
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Email address
    pub email: String,
    /// Identity provider uid; set once at creation, immutable
    #[serde(rename = "subjectId")]
    pub subject_id: String,
}
