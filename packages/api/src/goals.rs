//! # Goals — deadline-driven tasks
//!
//! The one resource with a full mutation surface: create, list, partial
//! patch, delete. Patch and delete are ownership-scoped by the store and
//! fail silently on a miss or a foreign document, so a goal id leaks nothing
//! about other users.
//!
//! The stored `status` is free text (conventionally `"Pending"` /
//! `"In Progress"` / `"Completed"`). What a client *displays* is the derived
//! status ([`Goal::derived_status`]): `Completed` wins outright, an elapsed
//! deadline makes the goal `Missed`, everything else is `Pending`. The
//! derivation takes the evaluation instant as a parameter and is never
//! persisted.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use store::{Document, DocumentStore};
use uuid::Uuid;

use crate::error::ApiError;

pub const COLLECTION: &str = "goals";

pub const DEFAULT_STATUS: &str = "Pending";
pub const STATUS_COMPLETED: &str = "Completed";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalFields {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deadline: Option<DateTime<Utc>>,
    status: String,
    updated_at: DateTime<Utc>,
}

/// Display status, derived at read time against an explicit clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DerivedStatus {
    Pending,
    Completed,
    Missed,
}

impl Goal {
    fn from_document(doc: &Document) -> Result<Self, ApiError> {
        let fields: GoalFields = doc.fields_as()?;
        Ok(Self {
            id: doc.id,
            user: doc.owner,
            title: fields.title,
            deadline: fields.deadline,
            status: fields.status,
            created_at: doc.created_at,
            updated_at: fields.updated_at,
        })
    }

    /// `Completed` if marked so; else `Missed` once the deadline is strictly
    /// in the past; else `Pending` (forever, if there is no deadline).
    pub fn derived_status(&self, now: DateTime<Utc>) -> DerivedStatus {
        if self.status == STATUS_COMPLETED {
            DerivedStatus::Completed
        } else if matches!(self.deadline, Some(deadline) if deadline < now) {
            DerivedStatus::Missed
        } else {
            DerivedStatus::Pending
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewGoal {
    pub title: Option<String>,
    pub deadline: Option<String>,
    pub status: Option<String>,
}

/// Partial update: only present fields are written.
#[derive(Debug, Default, Deserialize)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub deadline: Option<String>,
    pub status: Option<String>,
}

/// Parse a client-supplied deadline. Accepts RFC 3339 as well as the naive
/// `YYYY-MM-DDTHH:MM[:SS]` strings an HTML datetime-local input produces
/// (interpreted as UTC).
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

#[derive(Clone)]
pub struct GoalService {
    store: Arc<dyn DocumentStore>,
}

impl GoalService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: Uuid, req: NewGoal) -> Result<Goal, ApiError> {
        let title = req.title.as_deref().map(str::trim).unwrap_or_default();
        let deadline = req.deadline.as_deref().and_then(parse_deadline);
        if title.is_empty() || deadline.is_none() {
            return Err(ApiError::Validation(
                "Title and a valid deadline are required".into(),
            ));
        }

        let fields = GoalFields {
            title: title.to_string(),
            deadline,
            status: req.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            updated_at: Utc::now(),
        };
        let doc = self
            .store
            .insert(COLLECTION, Document::new(user, &fields)?)
            .await?;
        Goal::from_document(&doc)
    }

    pub async fn list(&self, user: Uuid) -> Result<Vec<Goal>, ApiError> {
        self.store
            .list_by_owner(COLLECTION, user)
            .await?
            .iter()
            .map(Goal::from_document)
            .collect()
    }

    /// Apply a partial patch to an owned goal. Returns `None` when the id
    /// does not exist or belongs to another user.
    pub async fn update(
        &self,
        user: Uuid,
        id: Uuid,
        patch: GoalPatch,
    ) -> Result<Option<Goal>, ApiError> {
        let mut fields = Map::new();
        if let Some(title) = patch.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ApiError::Validation("Title cannot be empty".into()));
            }
            fields.insert("title".into(), Value::String(title.to_string()));
        }
        if let Some(raw) = patch.deadline {
            let deadline = parse_deadline(&raw)
                .ok_or_else(|| ApiError::Validation("A valid deadline is required".into()))?;
            fields.insert("deadline".into(), Value::String(deadline.to_rfc3339()));
        }
        if let Some(status) = patch.status {
            fields.insert("status".into(), Value::String(status));
        }
        fields.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));

        let doc = self.store.update_owned(COLLECTION, user, id, fields).await?;
        doc.as_ref().map(Goal::from_document).transpose()
    }

    /// Delete an owned goal. A miss (or a foreign id) is a no-op, not an
    /// error.
    pub async fn delete(&self, user: Uuid, id: Uuid) -> Result<(), ApiError> {
        self.store.delete_owned(COLLECTION, user, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use store::MemoryStore;

    fn service() -> GoalService {
        GoalService::new(Arc::new(MemoryStore::new()))
    }

    fn new_goal(title: &str, deadline: &str) -> NewGoal {
        NewGoal {
            title: Some(title.into()),
            deadline: Some(deadline.into()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_title_and_resolvable_deadline() {
        let goals = service();
        let user = Uuid::new_v4();

        assert!(matches!(
            goals.create(user, new_goal("", "2030-01-01T09:00")).await,
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            goals.create(user, new_goal("Write report", "someday")).await,
            Err(ApiError::Validation(_))
        ));

        let goal = goals
            .create(user, new_goal("Write report", "2030-01-01T09:00"))
            .await
            .unwrap();
        assert_eq!(goal.status, DEFAULT_STATUS);
        assert!(goal.deadline.is_some());
    }

    #[tokio::test]
    async fn test_deadline_formats() {
        assert!(parse_deadline("2030-01-01T09:00").is_some());
        assert!(parse_deadline("2030-01-01T09:00:30").is_some());
        assert!(parse_deadline("2030-01-01T09:00:00Z").is_some());
        assert!(parse_deadline("2030-01-01T09:00:00+05:30").is_some());
        assert!(parse_deadline("tomorrow").is_none());
    }

    #[tokio::test]
    async fn test_derived_status_follows_clock_then_completion() {
        let goals = service();
        let user = Uuid::new_v4();
        let now = Utc::now();
        let tomorrow = now + Duration::days(1);

        let goal = goals
            .create(user, new_goal("Write report", &tomorrow.to_rfc3339()))
            .await
            .unwrap();
        assert_eq!(goal.derived_status(now), DerivedStatus::Pending);

        // Clock moves past the deadline.
        let later = tomorrow + Duration::hours(1);
        assert_eq!(goal.derived_status(later), DerivedStatus::Missed);

        // Completion wins regardless of the clock.
        let patched = goals
            .update(
                user,
                goal.id,
                GoalPatch {
                    status: Some(STATUS_COMPLETED.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.derived_status(later), DerivedStatus::Completed);
        assert_eq!(patched.derived_status(now), DerivedStatus::Completed);
    }

    #[tokio::test]
    async fn test_goal_without_deadline_is_pending_forever() {
        let goal = Goal {
            id: Uuid::new_v4(),
            user: Uuid::new_v4(),
            title: "Open-ended".into(),
            deadline: None,
            status: DEFAULT_STATUS.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let far_future = Utc::now() + Duration::days(10_000);
        assert_eq!(goal.derived_status(far_future), DerivedStatus::Pending);
    }

    #[tokio::test]
    async fn test_patch_and_delete_are_owner_scoped() {
        let goals = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let goal = goals
            .create(alice, new_goal("Alice's goal", "2030-01-01T09:00"))
            .await
            .unwrap();

        let stolen = goals
            .update(
                bob,
                goal.id,
                GoalPatch {
                    status: Some(STATUS_COMPLETED.into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(stolen.is_none());

        goals.delete(bob, goal.id).await.unwrap();
        assert_eq!(goals.list(alice).await.unwrap().len(), 1);

        goals.delete(alice, goal.id).await.unwrap();
        assert!(goals.list(alice).await.unwrap().is_empty());
    }
}
