//! Database connection management

use std::time::Duration;

use sqlx::{Pool, Postgres};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::utils::errors::BoostBuddyError;

pub type DatabasePool = Pool<Postgres>;

/// How long a caller may wait for a pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
/// Idle connections are recycled after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
/// Connections are replaced outright once they reach this age
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create a connection pool sized by the configuration.
///
/// The pool is probed once before it is handed out, so a bad URL fails here
/// rather than on the first query.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, BoostBuddyError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;

    info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );
    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), BoostBuddyError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), BoostBuddyError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
