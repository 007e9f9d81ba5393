pub mod lead;

use std::time::Duration;

use profileera_common::error::{ProfileEraError, ProfileEraResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;
const LAZY_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a Postgres connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> ProfileEraResult<PgPool> {
    tracing::info!("connecting to database");
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|e| ProfileEraError::Database(e.to_string()))
}

/// Create a pool that opens connections on first use.
///
/// Only the URL is checked here; an unreachable server surfaces as a
/// database error on the first query instead.
pub fn create_lazy_pool(database_url: &str) -> ProfileEraResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(LAZY_ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
        .map_err(|e| ProfileEraError::Database(e.to_string()))
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> ProfileEraResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| ProfileEraError::Database(e.to_string()))?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Apply migrations, retrying until the server accepts them.
///
/// The wait starts at `first_delay` and doubles after each failure up to
/// `max_delay`. Returns the number of attempts made.
pub async fn migrate_until_ready(
    pool: &PgPool,
    first_delay: Duration,
    max_delay: Duration,
) -> u32 {
    let mut delay = first_delay;
    let mut attempts = 0;
    loop {
        attempts += 1;
        match run_migrations(pool).await {
            Ok(()) => return attempts,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    attempt = attempts,
                    retry_in_ms = delay.as_millis() as u64,
                    "migrations not applied, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(max_delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_pool_fails_with_invalid_url() {
        let result = create_pool("postgres://invalid:5432/nonexistent").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn lazy_pool_rejects_malformed_url() {
        let result = create_lazy_pool("not a database url");
        assert!(matches!(result, Err(ProfileEraError::Database(_))));
    }

    #[tokio::test]
    async fn migrate_until_ready_keeps_retrying_while_unreachable() {
        let pool = create_lazy_pool("postgres://invalid:5432/nonexistent").expect("lazy pool");
        let outcome = tokio::time::timeout(
            Duration::from_millis(300),
            migrate_until_ready(&pool, Duration::from_millis(10), Duration::from_millis(20)),
        )
        .await;
        assert!(outcome.is_err(), "should still be retrying");
    }

    #[tokio::test]
    async fn lazy_pool_serves_leads_once_migrated() {
        use crate::lead::pg_repository::PgLeadRepository;
        use crate::lead::repositories::LeadRepository;

        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return;
        };
        let pool = create_lazy_pool(&url).expect("lazy pool");
        let attempts =
            migrate_until_ready(&pool, Duration::from_millis(10), Duration::from_millis(20)).await;
        assert_eq!(attempts, 1);

        let repo = PgLeadRepository::new(pool);
        assert!(repo.list().await.is_ok());
    }
}
