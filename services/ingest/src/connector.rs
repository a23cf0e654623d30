use async_trait::async_trait;

use punchsync_db::checkin::repositories::{CheckinHistory, CheckinSink};
use punchsync_db::cursor::repositories::CursorStore;
use punchsync_db::device_log::repositories::SourceConnector;
use punchsync_db::employee::repositories::IdentityLookup;

use crate::attendance::sync::SOURCE_NAME;
use crate::attendance::{AttendanceSyncer, SyncReport};

/// A source the worker loop can drive on a schedule.
#[async_trait]
pub trait Connector: Send + Sync {
    fn source_name(&self) -> &str;
    async fn sync(&self) -> SyncReport;
}

#[async_trait]
impl<C, I, H, K, S> Connector for AttendanceSyncer<C, I, H, K, S>
where
    C: SourceConnector,
    I: IdentityLookup,
    H: CheckinHistory,
    K: CheckinSink,
    S: CursorStore,
{
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    async fn sync(&self) -> SyncReport {
        self.run().await
    }
}
