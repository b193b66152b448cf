//! Account model and public view.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use showcase_core::types::{new_doc_id, DocId, Timestamp};

use super::Entity;

/// A stored account. Never serialize this into a response; use [`UserInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_doc_id(),
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const NAME: &'static str = "User";

    fn id(&self) -> DocId {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Public account info returned by the user endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub username: String,
    pub created_at: Timestamp,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}
