use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub course: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Announcement minus the server-assigned fields; create/update payload.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDraft {
    pub title: String,
    pub author: String,
    pub course: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub course: String,
    pub topic: String,
    // Serializes as ISO-8601, so outbound payloads are already canonical.
    pub due_date: DateTime<Utc>,
    pub contact: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraft {
    pub title: String,
    pub course: String,
    pub topic: String,
    pub due_date: DateTime<Utc>,
    pub contact: String,
}

/// Wrapper the API puts around list responses.
#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Vec<T>,
}

/// Seam between the generic store/client and a concrete entity type: REST
/// path, identity accessor, local placement of created items, and the
/// optional ordering rule restored after a mutation.
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Create/update payload for this entity.
    type Draft: Serialize + Send + Sync;

    /// Collection path under the API base; doubles as the plural label in
    /// fallback error messages.
    const PATH: &'static str;
    /// Singular label for per-mutation fallback messages.
    const SINGULAR: &'static str;

    fn id(&self) -> &str;

    /// Boundary checks on a draft, before it is ever sent.
    fn validate(draft: &Self::Draft) -> Result<(), Error>;

    /// Where a freshly created entity lands in the local collection.
    fn place_created(items: &mut Vec<Self>, created: Self);

    /// Ordering restored after an in-place update. Defaults to keeping the
    /// collection as-is.
    fn reorder(_items: &mut Vec<Self>) {}
}

impl Resource for Announcement {
    type Draft = AnnouncementDraft;
    const PATH: &'static str = "announcements";
    const SINGULAR: &'static str = "announcement";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(draft: &Self::Draft) -> Result<(), Error> {
        validate::announcement(draft)
    }

    // Newest first.
    fn place_created(items: &mut Vec<Self>, created: Self) {
        items.insert(0, created);
    }
}

impl Resource for Quiz {
    type Draft = QuizDraft;
    const PATH: &'static str = "quizzes";
    const SINGULAR: &'static str = "quiz";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(draft: &Self::Draft) -> Result<(), Error> {
        validate::quiz(draft)
    }

    fn place_created(items: &mut Vec<Self>, created: Self) {
        items.push(created);
        Self::reorder(items);
    }

    fn reorder(items: &mut Vec<Self>) {
        items.sort_by_key(|quiz| quiz.due_date);
    }
}
