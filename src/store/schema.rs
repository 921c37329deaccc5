//! Startup bootstrap for Postgres: create the database and the four resource
//! tables when they are missing. Idempotent; this is not a migration system.

use crate::error::AppError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const TABLES_DDL: &[(&str, &str)] = &[
    (
        "spells",
        r#"
        CREATE TABLE IF NOT EXISTS spells (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            tags JSONB NOT NULL DEFAULT '[]'::jsonb,
            "type" TEXT NOT NULL,
            moon_phase_recommendation TEXT,
            ingredients TEXT NOT NULL,
            steps TEXT NOT NULL,
            notes TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "dreams",
        r#"
        CREATE TABLE IF NOT EXISTS dreams (
            id BIGSERIAL PRIMARY KEY,
            "date" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            title TEXT,
            content TEXT NOT NULL,
            tags JSONB NOT NULL DEFAULT '[]'::jsonb,
            feeling_on_wake TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "desires",
        r#"
        CREATE TABLE IF NOT EXISTS desires (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            category TEXT,
            status TEXT NOT NULL DEFAULT 'open',
            notes TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "ritual_reminders",
        r#"
        CREATE TABLE IF NOT EXISTS ritual_reminders (
            id BIGSERIAL PRIMARY KEY,
            "type" TEXT NOT NULL,
            custom_label TEXT,
            "hour" INTEGER NOT NULL CHECK ("hour" BETWEEN 0 AND 23),
            "minute" INTEGER NOT NULL CHECK ("minute" BETWEEN 0 AND 59),
            enabled BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
];

/// Create the resource tables if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for (table, ddl) in TABLES_DDL {
        tracing::debug!(table = %table, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (admin URL pointing at `postgres`, database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::Internal("DATABASE_URL: no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim().to_string();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let admin_url = format!("{}postgres{}", &url[..path_start], query);
    Ok((admin_url, db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/grimoire").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "grimoire");
    }

    #[test]
    fn keeps_query_on_admin_url() {
        let (admin, db) = parse_db_name_from_url("postgres://localhost/grimoire?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(db, "grimoire");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("grim\"oire"), "\"grim\"\"oire\"");
    }

    #[test]
    fn every_table_is_bootstrapped() {
        let names: Vec<&str> = TABLES_DDL.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["spells", "dreams", "desires", "ritual_reminders"]);
    }
}
