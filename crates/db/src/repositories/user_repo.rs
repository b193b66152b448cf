//! Account-specific queries.

use crate::models::user::User;
use crate::models::Entity;
use crate::store::StoreError;
use crate::DbStore;

use super::DocumentRepo;

impl DocumentRepo<User> {
    /// Find an account by its unique username.
    pub async fn find_by_username(
        store: &DbStore,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        store
            .find_by_field(User::COLLECTION, "username", username)
            .await?
            .map(|body| serde_json::from_value(body).map_err(StoreError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::memory::MemoryDocumentStore;
    use crate::repositories::UserRepo;

    #[tokio::test]
    async fn finds_by_username_and_enforces_uniqueness() {
        let store: DbStore = Arc::new(MemoryDocumentStore::with_default_indexes());
        let alice = User::new("alice".into(), "hash".into());
        UserRepo::create(&store, &alice).await.unwrap();

        let found = UserRepo::find_by_username(&store, "alice").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);

        let dup = User::new("alice".into(), "other".into());
        assert_matches!(
            UserRepo::create(&store, &dup).await,
            Err(StoreError::DuplicateKey { field }) if field == "username"
        );
    }
}
