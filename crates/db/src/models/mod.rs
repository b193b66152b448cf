//! Entity models and request DTOs.
//!
//! Entities serialize with camelCase keys and `_id` so stored documents and
//! API responses share one shape.

pub mod blog_post;
pub mod project;
pub mod service;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use showcase_core::types::DocId;

/// A type persisted as a document in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Collection (table partition) name.
    const COLLECTION: &'static str;
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    fn id(&self) -> DocId;

    /// Bump `updatedAt` before a save.
    fn touch(&mut self);
}
