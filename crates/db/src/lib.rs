pub mod checkin;
pub mod cursor;
pub mod device_log;
pub mod employee;

use std::time::Duration;

use punchsync_common::error::{PunchsyncError, PunchsyncResult};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgConnection, PgPool};

/// Create a Postgres connection pool for the attendance store.
pub async fn create_pool(database_url: &str) -> PunchsyncResult<PgPool> {
    tracing::info!("connecting to attendance database");
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| PunchsyncError::Database(e.to_string()))
}

/// Open a single session against the device-log database.
///
/// Only connection establishment is bounded by `timeout`; queries on the returned
/// session are not.
pub async fn connect_source(
    options: &PgConnectOptions,
    timeout: Duration,
) -> PunchsyncResult<PgConnection> {
    match tokio::time::timeout(timeout, options.connect()).await {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => Err(PunchsyncError::Connection(e.to_string())),
        Err(_) => Err(PunchsyncError::Connection(format!(
            "timed out after {timeout:?}"
        ))),
    }
}
