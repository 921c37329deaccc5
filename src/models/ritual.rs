use super::Resource;
use crate::error::AppError;
use crate::validation::{check_optional_range, check_range, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A daily reminder for a ritual at `hour:minute`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualReminder {
    pub id: i64,
    /// Ritual kind, or "custom" together with `custom_label`. Free-form.
    #[serde(rename = "type")]
    pub kind: String,
    pub custom_label: Option<String>,
    pub hour: i32,
    pub minute: i32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRitualReminder {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub custom_label: Option<String>,
    pub hour: i32,
    pub minute: i32,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RitualReminderPatch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub custom_label: Option<String>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub enabled: Option<bool>,
}

impl Validate for NewRitualReminder {
    fn validate(&self) -> Result<(), AppError> {
        check_range("hour", self.hour, 0, 23)?;
        check_range("minute", self.minute, 0, 59)
    }
}

impl Validate for RitualReminderPatch {
    fn validate(&self) -> Result<(), AppError> {
        check_optional_range("hour", self.hour, 0, 23)?;
        check_optional_range("minute", self.minute, 0, 59)
    }
}

impl Resource for RitualReminder {
    type Create = NewRitualReminder;
    type Patch = RitualReminderPatch;

    const NOT_FOUND: &'static str = "Ritual não encontrado";

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, created_at: DateTime<Utc>, input: NewRitualReminder) -> Self {
        RitualReminder {
            id,
            kind: input.kind,
            custom_label: input.custom_label,
            hour: input.hour,
            minute: input.minute,
            enabled: input.enabled.unwrap_or(true),
            created_at,
        }
    }

    fn apply(&mut self, patch: RitualReminderPatch) {
        if let Some(v) = patch.kind {
            self.kind = v;
        }
        if let Some(v) = patch.custom_label {
            self.custom_label = Some(v);
        }
        if let Some(v) = patch.hour {
            self.hour = v;
        }
        if let Some(v) = patch.minute {
            self.minute = v;
        }
        if let Some(v) = patch.enabled {
            self.enabled = v;
        }
    }

    /// Earliest time of day first.
    fn listing_order(&self, other: &Self) -> Ordering {
        (self.hour, self.minute, self.id).cmp(&(other.hour, other.minute, other.id))
    }
}
