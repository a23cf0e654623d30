use chrono::NaiveDate;
use punchsync_common::error::PunchsyncResult;
use punchsync_db::device_log::models::SourceTable;
use punchsync_db::device_log::repositories::DeviceLogSource;
use punchsync_rules::PeriodTables;

/// Candidate tables for `today`, current period first, then the previous month.
pub fn candidate_tables<S: DeviceLogSource>(source: &S, today: NaiveDate) -> [SourceTable; 2] {
    let periods = PeriodTables::for_date(today);
    let naming = source.naming();
    [
        naming.table(periods.current.month, periods.current.year),
        naming.table(periods.fallback.month, periods.fallback.year),
    ]
}

/// Minimal readability check before a table is trusted for the range query.
pub async fn probe<S: DeviceLogSource>(source: &S, table: &SourceTable) -> PunchsyncResult<()> {
    match source.probe(table).await {
        Ok(()) => {
            tracing::debug!(table = %table, "source table reachable");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(table = %table, error = %e, "source table probe failed");
            Err(e)
        }
    }
}
