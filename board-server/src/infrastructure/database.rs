use anyhow::Result;
use sqlx::{
    postgres::PgPoolOptions,
    PgPool, Postgres, Transaction,
};

use crate::infrastructure::config::DatabaseConfig;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = config.connect_options()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?;

    tracing::info!(
        "Database connection pool created (max_connections={}, acquire_timeout={:?})",
        config.max_connections,
        config.acquire_timeout
    );
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// Opens the transaction every repository call runs in.
///
/// The isolation level must be set before any other statement of the
/// transaction. Dropping the returned value without `commit` rolls back.
pub async fn begin_repeatable_read(
    pool: &PgPool,
) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
