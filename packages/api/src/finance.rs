//! Finance log: income and expense entries, append-only.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{Document, DocumentStore};
use uuid::Uuid;

use crate::error::ApiError;

pub const COLLECTION: &str = "finance_entries";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceEntry {
    pub id: Uuid,
    pub user: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinanceFields {
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: f64,
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl FinanceEntry {
    fn from_document(doc: &Document) -> Result<Self, ApiError> {
        let fields: FinanceFields = doc.fields_as()?;
        Ok(Self {
            id: doc.id,
            user: doc.owner,
            kind: fields.kind,
            amount: fields.amount,
            category: fields.category,
            note: fields.note,
            date: doc.created_at,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewFinanceEntry {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub note: Option<String>,
}

#[derive(Clone)]
pub struct FinanceService {
    store: Arc<dyn DocumentStore>,
}

impl FinanceService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: Uuid, req: NewFinanceEntry) -> Result<FinanceEntry, ApiError> {
        let category = req.category.as_deref().map(str::trim).unwrap_or_default();
        let (Some(kind), Some(amount)) = (req.kind, req.amount) else {
            return Err(ApiError::Validation(
                "Type, amount, and category are required".into(),
            ));
        };
        if category.is_empty() {
            return Err(ApiError::Validation(
                "Type, amount, and category are required".into(),
            ));
        }
        if amount <= 0.0 {
            return Err(ApiError::Validation("Amount must be positive".into()));
        }

        let fields = FinanceFields {
            kind,
            amount,
            category: category.to_string(),
            note: req.note,
        };
        let doc = self
            .store
            .insert(COLLECTION, Document::new(user, &fields)?)
            .await?;
        FinanceEntry::from_document(&doc)
    }

    pub async fn list(&self, user: Uuid) -> Result<Vec<FinanceEntry>, ApiError> {
        self.store
            .list_by_owner(COLLECTION, user)
            .await?
            .iter()
            .map(FinanceEntry::from_document)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn service() -> FinanceService {
        FinanceService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let finance = service();
        let user = Uuid::new_v4();

        finance
            .create(
                user,
                NewFinanceEntry {
                    kind: Some(TransactionKind::Expense),
                    amount: Some(42.5),
                    category: Some("Groceries".into()),
                    note: None,
                },
            )
            .await
            .unwrap();

        let entries = finance.list(user).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, TransactionKind::Expense);
        assert_eq!(entries[0].amount, 42.5);
        assert_eq!(entries[0].category, "Groceries");
    }

    #[tokio::test]
    async fn test_amount_must_be_positive() {
        let finance = service();
        let user = Uuid::new_v4();

        for amount in [0.0, -10.0] {
            let req = NewFinanceEntry {
                kind: Some(TransactionKind::Income),
                amount: Some(amount),
                category: Some("Salary".into()),
                note: None,
            };
            assert!(matches!(
                finance.create(user, req).await,
                Err(ApiError::Validation(m)) if m == "Amount must be positive"
            ));
        }
    }

    #[tokio::test]
    async fn test_required_fields() {
        let finance = service();
        let user = Uuid::new_v4();

        let req = NewFinanceEntry {
            kind: None,
            amount: Some(10.0),
            category: Some("Misc".into()),
            note: None,
        };
        assert!(matches!(
            finance.create(user, req).await,
            Err(ApiError::Validation(_))
        ));
    }
}
