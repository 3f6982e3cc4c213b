//! PostgreSQL-backed DocumentStore.
//!
//! One `documents` table holds every collection: the envelope columns are
//! relational (id, collection, owner, creation time, an insertion sequence
//! for stable ordering) and the entity fields live in a JSONB column. All
//! queries are runtime-bound; owner scoping happens in the `WHERE` clause.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::document::{Document, DocumentStore};
use crate::error::StoreError;

#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open a connection pool and create the documents table if it does not
    /// exist yet.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY,
                collection TEXT NOT NULL,
                owner_id UUID NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                seq BIGINT GENERATED ALWAYS AS IDENTITY,
                fields JSONB NOT NULL
            );",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_owner_idx
             ON documents (collection, owner_id);",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn row_to_document(row: &PgRow) -> Result<Document, StoreError> {
    let fields = match row.try_get::<Value, _>("fields")? {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::Malformed(format!(
                "fields column holds non-object JSON: {other}"
            )))
        }
    };
    Ok(Document {
        id: row.try_get("id")?,
        owner: row.try_get("owner_id")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        fields,
    })
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError> {
        sqlx::query(
            "INSERT INTO documents (id, collection, owner_id, created_at, fields)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(document.id)
        .bind(collection)
        .bind(document.owner)
        .bind(document.created_at)
        .bind(Value::Object(document.fields.clone()))
        .execute(&self.pool)
        .await?;
        Ok(document)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(
            "SELECT id, owner_id, created_at, fields FROM documents
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_document).transpose()
    }

    async fn list_by_owner(
        &self,
        collection: &str,
        owner: Uuid,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, owner_id, created_at, fields FROM documents
             WHERE collection = $1 AND owner_id = $2
             ORDER BY created_at DESC, seq DESC",
        )
        .bind(collection)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_document).collect()
    }

    async fn update_owned(
        &self,
        collection: &str,
        owner: Uuid,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(
            "UPDATE documents SET fields = fields || $1
             WHERE collection = $2 AND owner_id = $3 AND id = $4
             RETURNING id, owner_id, created_at, fields",
        )
        .bind(Value::Object(patch))
        .bind(collection)
        .bind(owner)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_document).transpose()
    }

    async fn delete_owned(
        &self,
        collection: &str,
        owner: Uuid,
        id: Uuid,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM documents WHERE collection = $1 AND owner_id = $2 AND id = $3",
        )
        .bind(collection)
        .bind(owner)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(
            "SELECT id, owner_id, created_at, fields FROM documents
             WHERE collection = $1 AND fields->>$2 = $3
             LIMIT 1",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_document).transpose()
    }
}
