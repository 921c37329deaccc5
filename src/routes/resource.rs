//! CRUD routes for one resource, mounted under `/api/<resource>`.

use crate::handlers::{create, delete, list, read, update, Repo};
use crate::models::Resource;
use axum::{routing::get, Router};

pub fn resource_routes<R: Resource>(repo: Repo<R>) -> Router {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/:id", get(read::<R>).put(update::<R>).delete(delete::<R>))
        .with_state(repo)
}
