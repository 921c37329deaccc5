//! CRUD handlers shared by every resource. The repository arrives as router
//! state; errors go back unchanged to `AppError`'s response mapping.

use crate::error::AppError;
use crate::extractors::{EntityId, ValidJson};
use crate::models::Resource;
use crate::response::{created, deleted, ok};
use crate::store::Repository;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub type Repo<R> = Arc<dyn Repository<R>>;

fn not_found<R: Resource>() -> AppError {
    AppError::NotFound(R::NOT_FOUND.to_string())
}

/// GET / — every row in listing order.
pub async fn list<R: Resource>(State(repo): State<Repo<R>>) -> Result<impl IntoResponse, AppError> {
    let rows = repo.list_all().await?;
    Ok(ok(rows))
}

/// GET /:id
pub async fn read<R: Resource>(
    State(repo): State<Repo<R>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let row = repo.get_by_id(id).await?.ok_or_else(not_found::<R>)?;
    Ok(ok(row))
}

/// POST / — 201 with the stored entity.
pub async fn create<R: Resource>(
    State(repo): State<Repo<R>>,
    ValidJson(input): ValidJson<R::Create>,
) -> Result<impl IntoResponse, AppError> {
    let row = repo.create(input).await?;
    tracing::info!(id = row.id(), "created");
    Ok(created(row))
}

/// PUT /:id — partial merge; omitted fields keep their stored value.
pub async fn update<R: Resource>(
    State(repo): State<Repo<R>>,
    EntityId(id): EntityId,
    ValidJson(patch): ValidJson<R::Patch>,
) -> Result<impl IntoResponse, AppError> {
    let row = repo.update(id, patch).await?.ok_or_else(not_found::<R>)?;
    Ok(ok(row))
}

/// DELETE /:id
pub async fn delete<R: Resource>(
    State(repo): State<Repo<R>>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    if !repo.delete_by_id(id).await? {
        return Err(not_found::<R>());
    }
    tracing::info!(id, "deleted");
    Ok(deleted())
}
