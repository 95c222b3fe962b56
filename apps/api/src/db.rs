use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS productivity (
        id           BIGSERIAL PRIMARY KEY,
        name         VARCHAR(50)      NOT NULL,
        task_count   INTEGER          NOT NULL CHECK (task_count BETWEEN 1 AND 50),
        focus_hours  DOUBLE PRECISION NOT NULL CHECK (focus_hours BETWEEN 0 AND 12),
        stress_level INTEGER          NOT NULL CHECK (stress_level BETWEEN 1 AND 5),
        date         DATE             NOT NULL DEFAULT CURRENT_DATE,
        status       VARCHAR(16)      NOT NULL DEFAULT 'active'
                     CHECK (status IN ('active', 'archived'))
    )
    "#,
    "CREATE INDEX IF NOT EXISTS productivity_status_date_idx ON productivity (status, date DESC)",
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `productivity` table and its listing index if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
