//! PostgreSQL pool and schema setup for the content table

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::Config;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
/// Upper bound for the readiness check, independent of the acquire timeout
const PING_TIMEOUT: Duration = Duration::from_secs(3);

/// Pool sized and timed from config. Connections are checked before being
/// handed out so a database restart does not surface as request errors.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .idle_timeout(IDLE_TIMEOUT)
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await?;

    info!(
        max_connections = config.db_max_connections,
        acquire_timeout_secs = config.db_acquire_timeout_secs,
        "Catalog database pool ready"
    );

    Ok(pool)
}

/// Bring the content schema up to date
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;

    if let Some(latest) = MIGRATOR.iter().last() {
        info!(
            version = latest.version,
            "Content schema at migration {}", latest.description
        );
    }

    Ok(())
}

/// Storage check behind /api/health and /ready
pub async fn health_check(pool: &PgPool) -> bool {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool);

    match tokio::time::timeout(PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            error!("Catalog database unreachable: {}", e);
            false
        }
        Err(_) => {
            warn!("Catalog database ping timed out after {:?}", PING_TIMEOUT);
            false
        }
    }
}
