use super::{deleted, PgStore};
use crate::error::AppError;
use crate::models::{Dream, DreamPatch, NewDream};
use crate::store::Repository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;

const COLUMNS: &str = r#"id, "date", title, content, tags, feeling_on_wake, created_at"#;

#[derive(sqlx::FromRow)]
struct DreamRow {
    id: i64,
    date: DateTime<Utc>,
    title: Option<String>,
    content: String,
    tags: Json<Vec<String>>,
    feeling_on_wake: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<DreamRow> for Dream {
    fn from(row: DreamRow) -> Self {
        Dream {
            id: row.id,
            date: row.date,
            title: row.title,
            content: row.content,
            tags: row.tags.0,
            feeling_on_wake: row.feeling_on_wake,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl Repository<Dream> for PgStore {
    async fn list_all(&self) -> Result<Vec<Dream>, AppError> {
        let sql = format!(
            r#"SELECT {} FROM dreams ORDER BY "date" DESC, created_at DESC, id DESC"#,
            COLUMNS
        );
        let rows = sqlx::query_as::<_, DreamRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Dream::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Dream>, AppError> {
        let sql = format!("SELECT {} FROM dreams WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, DreamRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Dream::from))
    }

    /// `date` falls back to the insert time when not supplied.
    async fn create(&self, input: NewDream) -> Result<Dream, AppError> {
        let sql = format!(
            r#"
            INSERT INTO dreams ("date", title, content, tags, feeling_on_wake)
            VALUES (COALESCE($1, NOW()), $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        );
        tracing::debug!(table = "dreams", "insert");
        let row = sqlx::query_as::<_, DreamRow>(&sql)
            .bind(input.date)
            .bind(input.title)
            .bind(input.content)
            .bind(Json(input.tags.unwrap_or_default()))
            .bind(input.feeling_on_wake)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, patch: DreamPatch) -> Result<Option<Dream>, AppError> {
        let sql = format!(
            r#"
            UPDATE dreams SET
                "date" = COALESCE($2, "date"),
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                tags = COALESCE($5, tags),
                feeling_on_wake = COALESCE($6, feeling_on_wake)
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        tracing::debug!(table = "dreams", id, "update");
        let row = sqlx::query_as::<_, DreamRow>(&sql)
            .bind(id)
            .bind(patch.date)
            .bind(patch.title)
            .bind(patch.content)
            .bind(patch.tags.map(Json))
            .bind(patch.feeling_on_wake)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Dream::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM dreams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(deleted(result))
    }
}
