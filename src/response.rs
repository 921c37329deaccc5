//! Success response helpers. Entities are returned bare (no envelope); errors
//! use `{message}` (see `error`).

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of a successful DELETE.
#[derive(Serialize)]
pub struct Deleted {
    pub success: bool,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn deleted() -> (StatusCode, Json<Deleted>) {
    ok(Deleted { success: true })
}
