//! Persistence for the showcase API: the document-store seam, its Postgres
//! and in-memory backends, entity models, and typed repositories.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod store;

use std::sync::Arc;

pub use store::{DocumentStore, StoreError};

use crate::memory::MemoryDocumentStore;
use crate::postgres::PgDocumentStore;

/// Shared handle to the configured store backend.
pub type DbStore = Arc<dyn DocumentStore>;

/// `DATABASE_URL` prefix selecting the in-memory backend.
pub const MEMORY_URL: &str = "memory://";

/// `(collection, field)` pairs that must hold unique values. The Postgres
/// migrations declare a matching `uq_<collection>_<field>` index.
pub const UNIQUE_INDEXES: &[(&str, &str)] = &[("users", "username")];

/// Open the store named by `database_url`.
///
/// `memory://` selects [`MemoryDocumentStore`]; `postgres://` and
/// `postgresql://` connect a pool, verify it, and apply migrations.
pub async fn connect(database_url: &str) -> Result<DbStore, StoreError> {
    if database_url.starts_with(MEMORY_URL) {
        tracing::warn!("Using the in-memory document store; data is not persisted");
        return Ok(Arc::new(MemoryDocumentStore::with_default_indexes()));
    }

    if !(database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")) {
        let scheme = database_url.split("://").next().unwrap_or_default();
        return Err(StoreError::UnsupportedUrl(scheme.to_string()));
    }

    let pool = postgres::create_pool(database_url).await?;
    tracing::info!("Database connection pool created");

    postgres::health_check(&pool).await?;
    postgres::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgDocumentStore::new(pool)))
}
