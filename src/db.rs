//! Database access: connection acquisition with retry, schema setup, and
//! the single insert the write endpoint performs.
//!
//! Connection strategy:
//! - A fresh connection is opened for every call site (startup
//!   initialization and each write request) and closed when done; there is
//!   no pool.
//! - Acquisition retries on failure with a fixed delay between attempts,
//!   up to a configured attempt budget. Exhaustion is fatal at startup and
//!   fails the in-flight request otherwise.
//! - No timeout is applied to database operations.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::DatabaseConfig;
use crate::error::AppError;

const CREATE_HITS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS hits (
    id SERIAL PRIMARY KEY,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.dbname)
        .username(&config.user)
        .password(&config.password)
}

/// Open a connection to Postgres, retrying with a fixed delay between
/// attempts. Fails with [`AppError::Connect`] once the attempt budget is
/// exhausted.
pub async fn acquire_connection(config: &DatabaseConfig) -> Result<PgConnection, AppError> {
    let options = connect_options(config);
    let delay = Duration::from_secs(config.connect_delay_seconds);

    connect_with_retry(config.connect_retries, delay, || {
        PgConnection::connect_with(&options)
    })
    .await
}

/// Retry loop over a connect closure. Attempts are numbered from 1; each
/// failure is logged with its attempt number, and the delay is only slept
/// between attempts, not after the last one.
///
/// Generic over the connector so retry behavior is testable without a
/// reachable database.
async fn connect_with_retry<T, F, Fut>(
    retries: u32,
    delay: Duration,
    mut connect: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt: u32 = 1;
    loop {
        match connect().await {
            Ok(conn) => {
                tracing::info!(attempt, "Connected to Postgres");
                return Ok(conn);
            }
            Err(e) if attempt < retries => {
                tracing::warn!(attempt, retries, error = %e, "Postgres not ready, retrying");
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::warn!(attempt, retries, error = %e, "Postgres not ready, giving up");
                return Err(AppError::Connect {
                    attempts: retries,
                    source: e,
                });
            }
        }
    }
}

/// Create the `hits` table if it does not exist.
///
/// Safe to run on every process start, including concurrently from multiple
/// instances; `IF NOT EXISTS` provides that guarantee.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), AppError> {
    sqlx::query(CREATE_HITS_TABLE).execute(&mut *conn).await?;
    Ok(())
}

/// Record one hit. The row receives its id and timestamp from the column
/// defaults.
pub async fn insert_hit(conn: &mut PgConnection) -> Result<(), AppError> {
    sqlx::query("INSERT INTO hits DEFAULT VALUES")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Startup initialization: connect (with retry), ensure the schema, close.
///
/// Runs before the HTTP listener binds; any failure here stops the process.
pub async fn init(config: &DatabaseConfig) -> Result<(), AppError> {
    let mut conn = acquire_connection(config).await?;
    ensure_schema(&mut conn).await?;
    conn.close().await?;
    tracing::info!("Database initialized (table ensured)");
    Ok(())
}
