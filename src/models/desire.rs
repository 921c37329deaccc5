use super::Resource;
use crate::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_STATUS: &str = "open";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desire {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    /// Free-form; new desires start as "open".
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDesire {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesirePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl Validate for NewDesire {}
impl Validate for DesirePatch {}

impl Resource for Desire {
    type Create = NewDesire;
    type Patch = DesirePatch;

    const NOT_FOUND: &'static str = "Desejo não encontrado";

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, created_at: DateTime<Utc>, input: NewDesire) -> Self {
        Desire {
            id,
            title: input.title,
            category: input.category,
            status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            notes: input.notes,
            created_at,
        }
    }

    fn apply(&mut self, patch: DesirePatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.category {
            self.category = Some(v);
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.notes {
            self.notes = Some(v);
        }
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| other.id.cmp(&self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_defaults_to_open() {
        let input: NewDesire = serde_json::from_value(json!({ "title": "viajar" })).unwrap();
        let desire = Desire::materialize(1, Utc::now(), input);
        assert_eq!(desire.status, "open");
        assert_eq!(desire.category, None);
    }

    #[test]
    fn patch_overrides_only_given_fields() {
        let input: NewDesire =
            serde_json::from_value(json!({ "title": "viajar", "category": "vida" })).unwrap();
        let mut desire = Desire::materialize(1, Utc::now(), input);
        let patch: DesirePatch = serde_json::from_value(json!({ "status": "realizado" })).unwrap();
        desire.apply(patch);
        assert_eq!(desire.status, "realizado");
        assert_eq!(desire.title, "viajar");
        assert_eq!(desire.category.as_deref(), Some("vida"));
    }
}
