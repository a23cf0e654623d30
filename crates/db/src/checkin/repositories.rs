use async_trait::async_trait;
use chrono::NaiveDateTime;
use punchsync_common::types::Direction;

use crate::checkin::models::{CheckinEvent, LastCheckin};
use crate::employee::models::EmployeeRef;
use punchsync_common::error::PunchsyncResult;

#[async_trait]
pub trait CheckinHistory: Send + Sync {
    /// Latest checkin by punch time, however old.
    async fn most_recent(&self, employee: &EmployeeRef) -> PunchsyncResult<Option<LastCheckin>>;

    async fn exists(&self, employee: &EmployeeRef, time: NaiveDateTime) -> PunchsyncResult<bool>;
}

#[async_trait]
pub trait CheckinSink: Send + Sync {
    /// Durably record one checkin. Each call is atomic on its own.
    async fn create(
        &self,
        employee: &EmployeeRef,
        time: NaiveDateTime,
        direction: Direction,
    ) -> PunchsyncResult<CheckinEvent>;
}
