use super::{deleted, PgStore};
use crate::error::AppError;
use crate::models::desire::DEFAULT_STATUS;
use crate::models::{Desire, DesirePatch, NewDesire};
use crate::store::Repository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const COLUMNS: &str = "id, title, category, status, notes, created_at";

#[derive(sqlx::FromRow)]
struct DesireRow {
    id: i64,
    title: String,
    category: Option<String>,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<DesireRow> for Desire {
    fn from(row: DesireRow) -> Self {
        Desire {
            id: row.id,
            title: row.title,
            category: row.category,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl Repository<Desire> for PgStore {
    async fn list_all(&self) -> Result<Vec<Desire>, AppError> {
        let sql = format!("SELECT {} FROM desires ORDER BY created_at DESC, id DESC", COLUMNS);
        let rows = sqlx::query_as::<_, DesireRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Desire::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Desire>, AppError> {
        let sql = format!("SELECT {} FROM desires WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, DesireRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Desire::from))
    }

    async fn create(&self, input: NewDesire) -> Result<Desire, AppError> {
        let sql = format!(
            "INSERT INTO desires (title, category, status, notes) VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(table = "desires", "insert");
        let row = sqlx::query_as::<_, DesireRow>(&sql)
            .bind(input.title)
            .bind(input.category)
            .bind(input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()))
            .bind(input.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, patch: DesirePatch) -> Result<Option<Desire>, AppError> {
        let sql = format!(
            r#"
            UPDATE desires SET
                title = COALESCE($2, title),
                category = COALESCE($3, category),
                status = COALESCE($4, status),
                notes = COALESCE($5, notes)
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        tracing::debug!(table = "desires", id, "update");
        let row = sqlx::query_as::<_, DesireRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.category)
            .bind(patch.status)
            .bind(patch.notes)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Desire::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM desires WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(deleted(result))
    }
}
