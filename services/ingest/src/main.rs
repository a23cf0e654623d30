mod attendance;
mod connector;
mod source;

use std::time::Duration;

use punchsync_config::{init_tracing, AppConfig};
use punchsync_db::checkin::pg_repository::PgCheckinRepository;
use punchsync_db::cursor::pg_repository::PgCursorStore;
use punchsync_db::employee::pg_repository::PgEmployeeDirectory;
use tokio::time::MissedTickBehavior;

use crate::attendance::AttendanceSyncer;
use crate::connector::Connector;
use crate::source::PgSourceConnector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = AppConfig::from_env()?;
    tracing::info!(
        service = "punchsync-ingest",
        interval_secs = config.sync.interval_secs,
        run_once = config.sync.run_once,
        debounce_secs = config.sync.rules.debounce_secs,
        direction_source = config.sync.rules.direction_source.as_str(),
        "starting"
    );

    let pool = punchsync_db::create_pool(&config.database_url).await?;
    let checkins = PgCheckinRepository::new(pool.clone());
    let syncer = AttendanceSyncer::new(
        PgSourceConnector,
        PgEmployeeDirectory::new(pool.clone()),
        checkins.clone(),
        checkins,
        PgCursorStore::new(pool.clone()),
        config.sync.rules.clone(),
    );
    tracing::info!(source = syncer.source_name(), "connector ready");

    if config.sync.run_once {
        let report = syncer.sync().await;
        pool.close().await;
        if report.is_aborted() {
            return Err(match report.error {
                Some(err) => err.into(),
                None => anyhow::anyhow!("attendance sync aborted"),
            });
        }
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.sync.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // outcome is logged by the syncer; failures retry on the next tick
                syncer.sync().await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    pool.close().await;
    Ok(())
}
