//! In-process document store.
//!
//! Selected with `DATABASE_URL=memory://` for local development and used by
//! the integration tests. Data lives for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use showcase_core::types::DocId;
use tokio::sync::RwLock;

use crate::store::{DocumentStore, StoreError};

type Collection = IndexMap<DocId, Value>;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
    /// `(collection, field)` pairs whose values must be unique.
    unique: Vec<(String, String)>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a unique top-level field, mirroring a unique index.
    pub fn with_unique(mut self, collection: &str, field: &str) -> Self {
        self.unique.push((collection.to_string(), field.to_string()));
        self
    }

    /// A store carrying every unique index the application declares.
    pub fn with_default_indexes() -> Self {
        crate::UNIQUE_INDEXES
            .iter()
            .fold(Self::new(), |store, (collection, field)| {
                store.with_unique(collection, field)
            })
    }

    fn check_unique(
        &self,
        collection: &str,
        docs: &Collection,
        id: DocId,
        body: &Value,
    ) -> Result<(), StoreError> {
        let fields = self
            .unique
            .iter()
            .filter(|(c, _)| c == collection)
            .map(|(_, f)| f.as_str());

        for field in fields {
            let Some(candidate) = body.get(field).filter(|v| !v.is_null()) else {
                continue;
            };
            let taken = docs
                .iter()
                .any(|(other_id, doc)| *other_id != id && doc.get(field) == Some(candidate));
            if taken {
                return Err(StoreError::DuplicateKey {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, id: DocId, body: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        self.check_unique(collection, docs, id, &body)?;
        docs.insert(id, body);
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: DocId) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(&id))
            .cloned())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.values()
                .find(|doc| doc.get(field).and_then(Value::as_str) == Some(value))
                .cloned()
        }))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn replace(&self, collection: &str, id: DocId, body: Value) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        if !docs.contains_key(&id) {
            return Ok(false);
        }
        self.check_unique(collection, docs, id, &body)?;
        docs.insert(id, body);
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: DocId) -> Result<Option<Value>, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.shift_remove(&id)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
