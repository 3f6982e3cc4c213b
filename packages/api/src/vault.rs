//! Knowledge vault: saved links with a type tag, append-only.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{Document, DocumentStore};
use uuid::Uuid;

use crate::error::ApiError;

pub const COLLECTION: &str = "vault_items";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultKind {
    Article,
    Video,
    Tutorial,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItem {
    pub id: Uuid,
    pub user: Uuid,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: VaultKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VaultFields {
    url: String,
    #[serde(rename = "type")]
    kind: VaultKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl VaultItem {
    fn from_document(doc: &Document) -> Result<Self, ApiError> {
        let fields: VaultFields = doc.fields_as()?;
        Ok(Self {
            id: doc.id,
            user: doc.owner,
            url: fields.url,
            kind: fields.kind,
            notes: fields.notes,
            date: doc.created_at,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewVaultItem {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<VaultKind>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct VaultService {
    store: Arc<dyn DocumentStore>,
}

impl VaultService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: Uuid, req: NewVaultItem) -> Result<VaultItem, ApiError> {
        let url = req.url.as_deref().map(str::trim).unwrap_or_default();
        let Some(kind) = req.kind else {
            return Err(ApiError::Validation("URL and Type are required.".into()));
        };
        if url.is_empty() {
            return Err(ApiError::Validation("URL and Type are required.".into()));
        }

        let fields = VaultFields {
            url: url.to_string(),
            kind,
            notes: req.notes,
        };
        let doc = self
            .store
            .insert(COLLECTION, Document::new(user, &fields)?)
            .await?;
        VaultItem::from_document(&doc)
    }

    pub async fn list(&self, user: Uuid) -> Result<Vec<VaultItem>, ApiError> {
        self.store
            .list_by_owner(COLLECTION, user)
            .await?
            .iter()
            .map(VaultItem::from_document)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_create_validates_and_round_trips() {
        let vault = VaultService::new(Arc::new(MemoryStore::new()));
        let user = Uuid::new_v4();

        let missing_url = NewVaultItem {
            kind: Some(VaultKind::Article),
            ..Default::default()
        };
        assert!(matches!(
            vault.create(user, missing_url).await,
            Err(ApiError::Validation(m)) if m == "URL and Type are required."
        ));

        vault
            .create(
                user,
                NewVaultItem {
                    url: Some("https://doc.rust-lang.org/book/".into()),
                    kind: Some(VaultKind::Tutorial),
                    notes: Some("Read ch. 10 again".into()),
                },
            )
            .await
            .unwrap();

        let items = vault.list(user).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, VaultKind::Tutorial);
        assert_eq!(items[0].notes.as_deref(), Some("Read ch. 10 again"));
    }
}
