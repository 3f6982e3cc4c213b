//! # User model
//!
//! Two representations of a LifeStack user:
//!
//! - [`User`] — the complete record, including the Argon2 `password_hash`.
//!   Never serialized into a response.
//! - [`UserInfo`] — the client-safe projection (id, name, email) returned by
//!   register and `/api/auth/me`. [`User::to_info`] produces it.
//!
//! User documents own themselves: the document id doubles as the owner id
//! every other collection is scoped by. Email is stored trimmed and
//! lowercased, and uniqueness is checked against that normalized form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Document;
use uuid::Uuid;

use crate::error::ApiError;

pub const COLLECTION: &str = "users";

/// The stored fields of a user document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Full user record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_document(doc: &Document) -> Result<Self, ApiError> {
        let fields: UserFields = doc.fields_as()?;
        Ok(Self {
            id: doc.id,
            name: fields.name,
            email: fields.email,
            password_hash: fields.password_hash,
            created_at: doc.created_at,
        })
    }

    /// Convert to the projection that is safe to send to the client.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
