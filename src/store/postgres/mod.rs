//! Postgres repositories. Every statement is parameterized; updates merge in a
//! single `UPDATE … SET col = COALESCE($n, col)` so concurrent writers cannot
//! interleave a read and a write. `tags` columns are JSONB and cross this
//! boundary only as `Vec<String>`.

mod desires;
mod dreams;
mod rituals;
mod spells;

use super::HealthCheck;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

/// Shared pool handle; implements `Repository` for every resource.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// `true` when the DELETE removed a row.
fn deleted(result: sqlx::postgres::PgQueryResult) -> bool {
    result.rows_affected() > 0
}
