use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::device_log::models::{DeviceLogRecord, SourceTable, TableNaming};
use punchsync_common::error::PunchsyncResult;

/// A session against the device-log database.
#[async_trait]
pub trait DeviceLogSource: Send + Sync {
    fn naming(&self) -> &TableNaming;

    /// Cheap readability check of `table`.
    async fn probe(&self, table: &SourceTable) -> PunchsyncResult<()>;

    /// Rows with `LogDate > after`, oldest first.
    async fn fetch_after(
        &self,
        table: &SourceTable,
        after: NaiveDateTime,
    ) -> PunchsyncResult<Vec<DeviceLogRecord>>;
}

/// Opens one [`DeviceLogSource`] session per sync run.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    type Session: DeviceLogSource;

    async fn connect(&self) -> PunchsyncResult<Self::Session>;
}
