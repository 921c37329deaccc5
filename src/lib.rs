//! Grimório de Bolso API: REST backend for spells, dreams, desires and ritual reminders.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::{Settings, StoreConfig};
pub use error::{AppError, ConfigError};
pub use models::Resource;
pub use routes::{app, common_routes, resource_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, HealthCheck, MemoryStore, PgStore, Repository};
