use super::Resource;
use crate::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: i64,
    pub name: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub moon_phase_recommendation: Option<String>,
    pub ingredients: String,
    pub steps: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpell {
    pub name: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub moon_phase_recommendation: Option<String>,
    pub ingredients: String,
    pub steps: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpellPatch {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub moon_phase_recommendation: Option<String>,
    pub ingredients: Option<String>,
    pub steps: Option<String>,
    pub notes: Option<String>,
}

impl Validate for NewSpell {}
impl Validate for SpellPatch {}

impl Resource for Spell {
    type Create = NewSpell;
    type Patch = SpellPatch;

    const NOT_FOUND: &'static str = "Feitiço não encontrado";

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, created_at: DateTime<Utc>, input: NewSpell) -> Self {
        Spell {
            id,
            name: input.name,
            tags: input.tags.unwrap_or_default(),
            kind: input.kind,
            moon_phase_recommendation: input.moon_phase_recommendation,
            ingredients: input.ingredients,
            steps: input.steps,
            notes: input.notes,
            created_at,
        }
    }

    fn apply(&mut self, patch: SpellPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.tags {
            self.tags = v;
        }
        if let Some(v) = patch.kind {
            self.kind = v;
        }
        if let Some(v) = patch.moon_phase_recommendation {
            self.moon_phase_recommendation = Some(v);
        }
        if let Some(v) = patch.ingredients {
            self.ingredients = v;
        }
        if let Some(v) = patch.steps {
            self.steps = v;
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
