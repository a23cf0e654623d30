use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;

use punchsync_common::error::PunchsyncResult;
use punchsync_config::SourceConfig;
use punchsync_db::connect_source;
use punchsync_db::device_log::models::TableNaming;
use punchsync_db::device_log::pg_repository::PgDeviceLogSource;
use punchsync_db::device_log::repositories::SourceConnector;

const APPLICATION_NAME: &str = "punchsync-ingest";

/// Opens a fresh session to the device-log database for every run.
///
/// Settings are re-read from the environment each time, so a bad value aborts only
/// the current run and a fix is picked up without a restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgSourceConnector;

impl PgSourceConnector {
    fn connect_options(config: &SourceConfig) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .application_name(APPLICATION_NAME)
    }
}

#[async_trait]
impl SourceConnector for PgSourceConnector {
    type Session = PgDeviceLogSource;

    async fn connect(&self) -> PunchsyncResult<PgDeviceLogSource> {
        let config = SourceConfig::from_env()?;
        tracing::debug!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "connecting to device-log database"
        );

        let options = Self::connect_options(&config);
        let conn = connect_source(&options, config.connect_timeout).await?;
        let naming = TableNaming::new(config.schema.as_deref(), config.table_prefix.clone());
        Ok(PgDeviceLogSource::new(conn, naming))
    }
}
