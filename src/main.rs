//! Grimório de Bolso API server: reads settings from the environment, prepares the
//! datastore and serves the REST API.

use grimoire_api::{app, ensure_database_exists, ensure_schema, AppState, Settings, StoreConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let state = match &settings.store {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await?;
            ensure_schema(&pool).await?;
            AppState::postgres(pool)
        }
        StoreConfig::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            AppState::in_memory()
        }
    };

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("Grimório de Bolso API ouvindo em {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
