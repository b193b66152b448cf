//! PostgreSQL backend storing every collection in one JSONB `documents` table.

use async_trait::async_trait;
use serde_json::Value;
use showcase_core::types::DocId;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use crate::store::{DocumentStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error, turning unique-index violations into
/// [`StoreError::DuplicateKey`].
///
/// Unique indexes are named `uq_<collection>_<field>` so the offending field
/// can be recovered from the constraint name.
fn classify(collection: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let prefix = format!("uq_{collection}_");
            if let Some(field) = db_err
                .constraint()
                .and_then(|name| name.strip_prefix(prefix.as_str()))
            {
                return StoreError::DuplicateKey {
                    field: field.to_string(),
                };
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, id: DocId, body: Value) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(Json(&body))
            .execute(&self.pool)
            .await
            .map_err(|e| classify(collection, e))?;
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: DocId) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(body.map(|Json(v)| v))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT body FROM documents
             WHERE collection = $1 AND body ->> $2 = $3
             ORDER BY seq
             LIMIT 1",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;
        Ok(body.map(|Json(v)| v))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT body FROM documents WHERE collection = $1 ORDER BY seq",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|Json(v)| v).collect())
    }

    async fn replace(&self, collection: &str, id: DocId, body: Value) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .bind(Json(&body))
            .execute(&self.pool)
            .await
            .map_err(|e| classify(collection, e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: DocId) -> Result<Option<Value>, StoreError> {
        let body = sqlx::query_scalar::<_, Json<Value>>(
            "DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING body",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(body.map(|Json(v)| v))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
