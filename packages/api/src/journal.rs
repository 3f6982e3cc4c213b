//! Journal entries: free text plus a mood, append-only. There is no update
//! or delete surface; the list is the user's history.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{Document, DocumentStore};
use uuid::Uuid;

use crate::error::ApiError;

pub const COLLECTION: &str = "journal_entries";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JournalFields {
    text: String,
    mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_of_day: Option<String>,
}

impl JournalEntry {
    fn from_document(doc: &Document) -> Result<Self, ApiError> {
        let fields: JournalFields = doc.fields_as()?;
        Ok(Self {
            id: doc.id,
            user: doc.owner,
            text: fields.text,
            mood: fields.mood,
            time_of_day: fields.time_of_day,
            date: doc.created_at,
        })
    }
}

/// Request body for saving an entry. Fields are optional so that a missing
/// one surfaces as a validation error rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewJournalEntry {
    pub text: Option<String>,
    pub mood: Option<Mood>,
    pub time: Option<String>,
}

#[derive(Clone)]
pub struct JournalService {
    store: Arc<dyn DocumentStore>,
}

impl JournalService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: Uuid, req: NewJournalEntry) -> Result<JournalEntry, ApiError> {
        let text = req.text.as_deref().map(str::trim).unwrap_or_default();
        let Some(mood) = req.mood else {
            return Err(ApiError::Validation("Text and mood required".into()));
        };
        if text.is_empty() {
            return Err(ApiError::Validation("Text and mood required".into()));
        }

        let fields = JournalFields {
            text: text.to_string(),
            mood,
            time_of_day: req.time,
        };
        let doc = self
            .store
            .insert(COLLECTION, Document::new(user, &fields)?)
            .await?;
        JournalEntry::from_document(&doc)
    }

    pub async fn list(&self, user: Uuid) -> Result<Vec<JournalEntry>, ApiError> {
        self.store
            .list_by_owner(COLLECTION, user)
            .await?
            .iter()
            .map(JournalEntry::from_document)
            .collect()
    }
}
