use super::{flexible_date, Resource};
use crate::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dream {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub title: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub feeling_on_wake: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDream {
    /// Defaults to the creation time.
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub feeling_on_wake: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DreamPatch {
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub feeling_on_wake: Option<String>,
}

impl Validate for NewDream {}
impl Validate for DreamPatch {}

impl Resource for Dream {
    type Create = NewDream;
    type Patch = DreamPatch;

    const NOT_FOUND: &'static str = "Sonho não encontrado";

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, created_at: DateTime<Utc>, input: NewDream) -> Self {
        Dream {
            id,
            date: input.date.unwrap_or(created_at),
            title: input.title,
            content: input.content,
            tags: input.tags.unwrap_or_default(),
            feeling_on_wake: input.feeling_on_wake,
            created_at,
        }
    }

    fn apply(&mut self, patch: DreamPatch) {
        if let Some(v) = patch.date {
            self.date = v;
        }
        if let Some(v) = patch.title {
            self.title = Some(v);
        }
        if let Some(v) = patch.content {
            self.content = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
        if let Some(v) = patch.feeling_on_wake {
            self.feeling_on_wake = Some(v);
        }
    }

    /// Most recent dream first; same date falls back to creation time.
    fn listing_order(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| other.id.cmp(&self.id))
    }
}
