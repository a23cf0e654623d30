use chrono::NaiveDateTime;
use punchsync_common::error::PunchsyncResult;
use punchsync_db::device_log::models::{DeviceLogRecord, SourceTable};
use punchsync_db::device_log::repositories::DeviceLogSource;

/// Every punch in `table` strictly after `after`, oldest first.
///
/// The source is asked to order the rows; the sort here keeps later direction
/// inference correct even if a driver or view ignores the ordering. It is stable,
/// so punches sharing a timestamp keep source order.
pub async fn fetch_logs<S: DeviceLogSource>(
    source: &S,
    table: &SourceTable,
    after: NaiveDateTime,
) -> PunchsyncResult<Vec<DeviceLogRecord>> {
    let mut rows = source.fetch_after(table, after).await.map_err(|e| {
        tracing::warn!(table = %table, error = %e, "device log query failed");
        e
    })?;

    rows.retain(|r| r.log_date > after);
    rows.sort_by_key(|r| r.log_date);

    tracing::info!(table = %table, count = rows.len(), after = %after, "fetched device logs");
    Ok(rows)
}
