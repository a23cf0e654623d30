use async_trait::async_trait;

use crate::employee::models::EmployeeRef;
use punchsync_common::error::PunchsyncResult;

#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Map the user id a device reports to an employee. `None` means unregistered.
    async fn find_employee_by_device_subject_id(
        &self,
        subject_id: &str,
    ) -> PunchsyncResult<Option<EmployeeRef>>;
}
