//! # Document store — owner-scoped, schema-flexible persistence
//!
//! This module is the core of LifeStack's storage layer. Every entity the
//! application persists (users, journal entries, goals, finance entries,
//! vault items) is stored as a [`Document`]: a generated id, an owner id, a
//! creation timestamp, and a flat JSON object of entity fields. Collections
//! are plain string names; there is no per-collection schema.
//!
//! All reads and writes go through the [`DocumentStore`] trait, so the same
//! logic works against an in-memory store ([`crate::MemoryStore`], used by
//! every test) or PostgreSQL ([`crate::PostgresStore`], one JSONB table).
//!
//! ## Ownership scoping
//!
//! The trait is the single place where ownership is enforced:
//!
//! | Method | Scoping behavior |
//! |--------|------------------|
//! | [`list_by_owner`](DocumentStore::list_by_owner) | only the owner's documents, newest-created-first |
//! | [`update_owned`](DocumentStore::update_owned) | `None` when the id is absent *or* owned by someone else |
//! | [`delete_owned`](DocumentStore::delete_owned) | `false` (no error) on the same misses |
//!
//! A caller holding a foreign document id learns nothing: a miss and a
//! foreign document are indistinguishable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;

/// A single schema-less record: envelope plus entity fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Build a new document owned by `owner` from any serializable set of
    /// fields. The id and creation timestamp are assigned here.
    pub fn new<T: Serialize>(owner: Uuid, fields: &T) -> Result<Self, StoreError> {
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            created_at: Utc::now(),
            fields: to_field_map(fields)?,
        })
    }

    /// Build a document that owns itself (`owner == id`). Used for user
    /// records, where the document id *is* the owner id everything else is
    /// scoped by.
    pub fn self_owned<T: Serialize>(fields: &T) -> Result<Self, StoreError> {
        let id = Uuid::new_v4();
        Ok(Self {
            id,
            owner: id,
            created_at: Utc::now(),
            fields: to_field_map(fields)?,
        })
    }

    /// Deserialize the entity fields into a concrete type.
    pub fn fields_as<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

/// Serialize entity fields into the flat JSON object a document carries.
pub fn to_field_map<T: Serialize>(fields: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(fields).map_err(|e| StoreError::Malformed(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Malformed(format!(
            "expected a JSON object of fields, got {other}"
        ))),
    }
}

/// Async interface over a document store backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document in `collection`.
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError>;

    /// Fetch a document by id, regardless of owner.
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// All of `owner`'s documents in `collection`, newest-created-first.
    async fn list_by_owner(&self, collection: &str, owner: Uuid)
        -> Result<Vec<Document>, StoreError>;

    /// Merge `patch` into the top-level fields of the document, but only if
    /// it exists and belongs to `owner`. Returns the updated document.
    async fn update_owned(
        &self,
        collection: &str,
        owner: Uuid,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError>;

    /// Delete the document if it exists and belongs to `owner`. Returns
    /// whether anything was removed.
    async fn delete_owned(&self, collection: &str, owner: Uuid, id: Uuid)
        -> Result<bool, StoreError>;

    /// First document in `collection` whose `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError>;
}
