//! The document-store seam.
//!
//! Documents are JSON objects grouped into named collections and addressed
//! by [`DocId`]. Backends only need id-indexed CRUD plus lookup by a single
//! top-level string field; typed access lives in [`crate::repositories`].

use async_trait::async_trait;
use serde_json::Value;
use showcase_core::types::DocId;

/// Errors raised by a [`DocumentStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A declared unique field already holds the submitted value.
    #[error("Duplicate key {field} entered")]
    DuplicateKey { field: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored document did not match the expected shape.
    #[error("Malformed document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported database URL scheme: {0}")]
    UnsupportedUrl(String),
}

/// Persistence operations the API relies on.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Fails with [`StoreError::DuplicateKey`] when a
    /// unique field collides.
    async fn insert(&self, collection: &str, id: DocId, body: Value) -> Result<(), StoreError>;

    async fn find_by_id(&self, collection: &str, id: DocId) -> Result<Option<Value>, StoreError>;

    /// Find the first document whose top-level `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError>;

    /// All documents of a collection in insertion order.
    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Overwrite an existing document. Returns `false` if no such id exists.
    async fn replace(&self, collection: &str, id: DocId, body: Value) -> Result<bool, StoreError>;

    /// Remove a document, returning it if it existed.
    async fn delete(&self, collection: &str, id: DocId) -> Result<Option<Value>, StoreError>;

    /// Cheap reachability check for health probes.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release backend resources. Called once after the server stops.
    async fn close(&self) {}
}
