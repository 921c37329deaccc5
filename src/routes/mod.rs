//! Router assembly: common routes, the four resources, fallback and HTTP layers.

pub mod common;
pub mod resource;

pub use common::{common_routes, SERVICE_NAME};
pub use resource::resource_routes;

use crate::handlers::{create, list, route_not_found, Repo};
use crate::models::Resource;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Upper bound for request bodies.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// `/api/spells`, `/api/dreams`, `/api/desires`, `/api/rituals`.
pub fn api_routes(state: &AppState) -> Router {
    let router = Router::new();
    let router = mount(router, "/api/spells", state.spells.clone());
    let router = mount(router, "/api/dreams", state.dreams.clone());
    let router = mount(router, "/api/desires", state.desires.clone());
    mount(router, "/api/rituals", state.rituals.clone())
}

/// Nests one resource at `prefix`; `prefix/` also serves the collection.
fn mount<R: Resource>(router: Router, prefix: &str, repo: Repo<R>) -> Router {
    let collection = get(list::<R>).post(create::<R>).with_state(repo.clone());
    router
        .nest(prefix, resource_routes(repo))
        .route(&format!("{}/", prefix), collection)
}

/// Complete application: CORS for any origin, per-request tracing, JSON 404 for
/// unknown paths and for unsupported methods on known ones.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.health.clone()))
        .merge(api_routes(&state))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
