//! Domain entities and their request shapes (create input and partial patch).
//!
//! Wire names are camelCase. In a patch every field is optional: a key that is
//! present overrides the stored value (even `""`, `0` or `false`), a key that is
//! absent or `null` keeps it.

pub mod desire;
pub mod dream;
pub mod ritual;
pub mod spell;

pub use desire::{Desire, DesirePatch, NewDesire};
pub use dream::{Dream, DreamPatch, NewDream};
pub use ritual::{NewRitualReminder, RitualReminder, RitualReminderPatch};
pub use spell::{NewSpell, Spell, SpellPatch};

use crate::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::cmp::Ordering;

/// A CRUD resource exposed under `/api/<resource>`.
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Patch: DeserializeOwned + Validate + Default + Send + 'static;

    /// Message of the 404 envelope for this resource.
    const NOT_FOUND: &'static str;

    fn id(&self) -> i64;

    /// Build the stored entity from a create input, filling server defaults.
    fn materialize(id: i64, created_at: DateTime<Utc>, input: Self::Create) -> Self;

    /// Merge a patch into the entity.
    fn apply(&mut self, patch: Self::Patch);

    /// Order used by `list_all`.
    fn listing_order(&self, other: &Self) -> Ordering;
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub(crate) mod flexible_date {
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub fn parse(s: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(d.and_time(NaiveTime::MIN).and_utc());
        }
        Err(format!("data inválida: '{}'", s))
    }

}
