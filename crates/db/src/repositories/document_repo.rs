//! Generic CRUD for any [`Entity`].

use std::marker::PhantomData;

use serde_json::Value;
use showcase_core::types::DocId;

use crate::models::Entity;
use crate::store::StoreError;
use crate::DbStore;

/// Provides CRUD operations for the collection of `E`.
pub struct DocumentRepo<E>(PhantomData<E>);

fn decode<E: Entity>(body: Value) -> Result<E, StoreError> {
    Ok(serde_json::from_value(body)?)
}

impl<E: Entity> DocumentRepo<E> {
    /// Insert a new entity.
    pub async fn create(store: &DbStore, entity: &E) -> Result<(), StoreError> {
        let body = serde_json::to_value(entity)?;
        store.insert(E::COLLECTION, entity.id(), body).await
    }

    pub async fn find_by_id(store: &DbStore, id: DocId) -> Result<Option<E>, StoreError> {
        store
            .find_by_id(E::COLLECTION, id)
            .await?
            .map(decode::<E>)
            .transpose()
    }

    /// List every entity in insertion order.
    pub async fn list(store: &DbStore) -> Result<Vec<E>, StoreError> {
        store
            .list(E::COLLECTION)
            .await?
            .into_iter()
            .map(decode::<E>)
            .collect()
    }

    /// Overwrite a stored entity. Returns `false` if it no longer exists.
    pub async fn save(store: &DbStore, entity: &E) -> Result<bool, StoreError> {
        let body = serde_json::to_value(entity)?;
        store.replace(E::COLLECTION, entity.id(), body).await
    }

    /// Delete by id, returning the removed entity.
    pub async fn delete(store: &DbStore, id: DocId) -> Result<Option<E>, StoreError> {
        store
            .delete(E::COLLECTION, id)
            .await?
            .map(decode::<E>)
            .transpose()
    }
}
