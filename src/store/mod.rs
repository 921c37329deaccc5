//! Datastore access: the repository contract plus its Postgres and in-memory backends.

pub mod memory;
pub mod postgres;
pub mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::{ensure_database_exists, ensure_schema};

use crate::error::AppError;
use crate::models::Resource;
use async_trait::async_trait;

/// CRUD over one resource table. Missing rows are `None`/`false`, never errors.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// All rows in the resource's listing order.
    async fn list_all(&self) -> Result<Vec<R>, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<R>, AppError>;

    /// Insert and return the stored row, server defaults included.
    async fn create(&self, input: R::Create) -> Result<R, AppError>;

    /// Merge `patch` into row `id`. `None` when the row does not exist (nothing is written).
    async fn update(&self, id: i64, patch: R::Patch) -> Result<Option<R>, AppError>;

    /// `true` when a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
}

/// Readiness probe for the backing datastore.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}
