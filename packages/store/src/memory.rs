use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::document::{Document, DocumentStore};
use crate::error::StoreError;

/// In-memory DocumentStore for testing and single-process deployments.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn list_by_owner(
        &self,
        collection: &str,
        owner: Uuid,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                // Reverse first so a stable sort keeps newest-inserted first
                // among documents sharing a timestamp.
                docs.iter()
                    .rev()
                    .filter(|d| d.owner == owner)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn update_owned(
        &self,
        collection: &str,
        owner: Uuid,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(doc) = docs.iter_mut().find(|d| d.id == id && d.owner == owner) else {
            return Ok(None);
        };
        for (key, value) in patch {
            doc.fields.insert(key, value);
        }
        Ok(Some(doc.clone()))
    }

    async fn delete_owned(
        &self,
        collection: &str,
        owner: Uuid,
        id: Uuid,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| !(d.id == id && d.owner == owner));
        Ok(docs.len() < before)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|d| d.fields.get(field).and_then(Value::as_str) == Some(value))
                .cloned()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Fields<'a> {
        label: &'a str,
    }

    fn patch(key: &str, value: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(value.to_string()));
        map
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        for label in ["first", "second", "third"] {
            let doc = Document::new(owner, &Fields { label }).unwrap();
            store.insert("things", doc).await.unwrap();
        }

        let docs = store.list_by_owner("things", owner).await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].fields["label"], "third");
        assert_eq!(docs[2].fields["label"], "first");
    }

    #[tokio::test]
    async fn test_list_never_crosses_owners() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store
            .insert("things", Document::new(alice, &Fields { label: "a" }).unwrap())
            .await
            .unwrap();
        store
            .insert("things", Document::new(bob, &Fields { label: "b" }).unwrap())
            .await
            .unwrap();

        let docs = store.list_by_owner("things", alice).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].fields["label"], "a");

        let nobody = Uuid::new_v4();
        assert!(store.list_by_owner("things", nobody).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_owned_merges_fields() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let doc = store
            .insert("things", Document::new(owner, &Fields { label: "old" }).unwrap())
            .await
            .unwrap();

        let updated = store
            .update_owned("things", owner, doc.id, patch("label", "new"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.fields["label"], "new");
        assert_eq!(updated.id, doc.id);
    }

    #[tokio::test]
    async fn test_update_and_delete_ignore_foreign_documents() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let doc = store
            .insert("things", Document::new(alice, &Fields { label: "a" }).unwrap())
            .await
            .unwrap();

        let stolen = store
            .update_owned("things", bob, doc.id, patch("label", "b"))
            .await
            .unwrap();
        assert!(stolen.is_none());

        assert!(!store.delete_owned("things", bob, doc.id).await.unwrap());
        assert_eq!(store.list_by_owner("things", alice).await.unwrap().len(), 1);

        assert!(store.delete_owned("things", alice, doc.id).await.unwrap());
        assert!(store.list_by_owner("things", alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_field() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store
            .insert("things", Document::new(owner, &Fields { label: "wanted" }).unwrap())
            .await
            .unwrap();

        let found = store
            .find_by_field("things", "label", "wanted")
            .await
            .unwrap();
        assert!(found.is_some());
        assert!(store
            .find_by_field("things", "label", "missing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_self_owned_document() {
        let doc = Document::self_owned(&Fields { label: "me" }).unwrap();
        assert_eq!(doc.id, doc.owner);
    }
}
