use crate::error::DbError;
use configuration::DatabaseSettings;
use dotenvy::dotenv;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

/// Resolves the database URL: the configured value first, then `DATABASE_URL`
/// (after loading a `.env` file if one exists).
pub fn database_url(settings: &DatabaseSettings) -> Result<String, DbError> {
    if let Some(url) = &settings.url {
        return Ok(url.clone());
    }
    dotenv().ok();
    env::var("DATABASE_URL").map_err(|_e| {
        DbError::ConnectionConfigError(
            "database.url or DATABASE_URL must be set.".to_string(),
        )
    })
}

fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
}

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool can be shared across the entire application for concurrent
/// database access.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let database_url = database_url(settings)?;
    let pool = pool_options(settings).connect(&database_url).await?;
    tracing::info!(max_connections = settings.max_connections, "Database pool ready.");
    Ok(pool)
}

/// Builds a pool that opens connections on first use.
pub fn connect_lazy(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let database_url = database_url(settings)?;
    Ok(pool_options(settings).connect_lazy(&database_url)?)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}
