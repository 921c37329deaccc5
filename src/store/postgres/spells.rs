use super::{deleted, PgStore};
use crate::error::AppError;
use crate::models::{NewSpell, Spell, SpellPatch};
use crate::store::Repository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;

const COLUMNS: &str = r#"id, name, tags, "type", moon_phase_recommendation, ingredients, steps, notes, created_at"#;

#[derive(sqlx::FromRow)]
struct SpellRow {
    id: i64,
    name: String,
    tags: Json<Vec<String>>,
    #[sqlx(rename = "type")]
    kind: String,
    moon_phase_recommendation: Option<String>,
    ingredients: String,
    steps: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SpellRow> for Spell {
    fn from(row: SpellRow) -> Self {
        Spell {
            id: row.id,
            name: row.name,
            tags: row.tags.0,
            kind: row.kind,
            moon_phase_recommendation: row.moon_phase_recommendation,
            ingredients: row.ingredients,
            steps: row.steps,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl Repository<Spell> for PgStore {
    async fn list_all(&self) -> Result<Vec<Spell>, AppError> {
        let sql = format!("SELECT {} FROM spells ORDER BY created_at DESC, id DESC", COLUMNS);
        let rows = sqlx::query_as::<_, SpellRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Spell::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Spell>, AppError> {
        let sql = format!("SELECT {} FROM spells WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, SpellRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Spell::from))
    }

    async fn create(&self, input: NewSpell) -> Result<Spell, AppError> {
        let sql = format!(
            r#"
            INSERT INTO spells (name, tags, "type", moon_phase_recommendation, ingredients, steps, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COLUMNS
        );
        tracing::debug!(table = "spells", "insert");
        let row = sqlx::query_as::<_, SpellRow>(&sql)
            .bind(input.name)
            .bind(Json(input.tags.unwrap_or_default()))
            .bind(input.kind)
            .bind(input.moon_phase_recommendation)
            .bind(input.ingredients)
            .bind(input.steps)
            .bind(input.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, patch: SpellPatch) -> Result<Option<Spell>, AppError> {
        let sql = format!(
            r#"
            UPDATE spells SET
                name = COALESCE($2, name),
                tags = COALESCE($3, tags),
                "type" = COALESCE($4, "type"),
                moon_phase_recommendation = COALESCE($5, moon_phase_recommendation),
                ingredients = COALESCE($6, ingredients),
                steps = COALESCE($7, steps),
                notes = COALESCE($8, notes)
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        tracing::debug!(table = "spells", id, "update");
        let row = sqlx::query_as::<_, SpellRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.tags.map(Json))
            .bind(patch.kind)
            .bind(patch.moon_phase_recommendation)
            .bind(patch.ingredients)
            .bind(patch.steps)
            .bind(patch.notes)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Spell::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM spells WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(deleted(result))
    }
}
