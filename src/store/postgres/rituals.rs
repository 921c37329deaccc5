use super::{deleted, PgStore};
use crate::error::AppError;
use crate::models::{NewRitualReminder, RitualReminder, RitualReminderPatch};
use crate::store::Repository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const COLUMNS: &str = r#"id, "type", custom_label, "hour", "minute", enabled, created_at"#;

#[derive(sqlx::FromRow)]
struct RitualRow {
    id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    custom_label: Option<String>,
    hour: i32,
    minute: i32,
    enabled: bool,
    created_at: DateTime<Utc>,
}

impl From<RitualRow> for RitualReminder {
    fn from(row: RitualRow) -> Self {
        RitualReminder {
            id: row.id,
            kind: row.kind,
            custom_label: row.custom_label,
            hour: row.hour,
            minute: row.minute,
            enabled: row.enabled,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl Repository<RitualReminder> for PgStore {
    async fn list_all(&self) -> Result<Vec<RitualReminder>, AppError> {
        let sql = format!(
            r#"SELECT {} FROM ritual_reminders ORDER BY "hour", "minute", id"#,
            COLUMNS
        );
        let rows = sqlx::query_as::<_, RitualRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(RitualReminder::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<RitualReminder>, AppError> {
        let sql = format!("SELECT {} FROM ritual_reminders WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, RitualRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(RitualReminder::from))
    }

    async fn create(&self, input: NewRitualReminder) -> Result<RitualReminder, AppError> {
        let sql = format!(
            r#"
            INSERT INTO ritual_reminders ("type", custom_label, "hour", "minute", enabled)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        );
        tracing::debug!(table = "ritual_reminders", "insert");
        let row = sqlx::query_as::<_, RitualRow>(&sql)
            .bind(input.kind)
            .bind(input.custom_label)
            .bind(input.hour)
            .bind(input.minute)
            .bind(input.enabled.unwrap_or(true))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        patch: RitualReminderPatch,
    ) -> Result<Option<RitualReminder>, AppError> {
        let sql = format!(
            r#"
            UPDATE ritual_reminders SET
                "type" = COALESCE($2, "type"),
                custom_label = COALESCE($3, custom_label),
                "hour" = COALESCE($4, "hour"),
                "minute" = COALESCE($5, "minute"),
                enabled = COALESCE($6, enabled)
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        tracing::debug!(table = "ritual_reminders", id, "update");
        let row = sqlx::query_as::<_, RitualRow>(&sql)
            .bind(id)
            .bind(patch.kind)
            .bind(patch.custom_label)
            .bind(patch.hour)
            .bind(patch.minute)
            .bind(patch.enabled)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(RitualReminder::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM ritual_reminders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(deleted(result))
    }
}
