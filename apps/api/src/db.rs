use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cases (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    front       TEXT UNIQUE,
    back        TEXT NOT NULL DEFAULT '',
    tags        TEXT NOT NULL DEFAULT '',
    keywords    TEXT NOT NULL DEFAULT '',
    next_review TIMESTAMP,
    modified    TIMESTAMP NOT NULL
)
"#;

/// Creates a SQLite connection pool, creating the database file if needed,
/// and makes sure the `cases` table exists.
pub async fn create_pool(database: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database {database}...");

    let options = if database.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(database)
            .with_context(|| format!("Invalid database URL '{database}'"))?
    } else {
        SqliteConnectOptions::new().filename(database)
    }
    .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    ensure_schema(&pool).await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .context("Failed to create the cases table")?;
    Ok(())
}

/// Single-connection in-memory pool; each connection to `:memory:` is its own database.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}
