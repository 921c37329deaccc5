use crate::error::AppError;
use axum::extract::OriginalUri;

/// Any request no route matched.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Rota não encontrada - {}", uri))
}
