use punchsync_common::error::PunchsyncResult;
use punchsync_common::types::Direction;
use punchsync_db::checkin::models::LastCheckin;
use punchsync_db::checkin::repositories::CheckinHistory;
use punchsync_db::device_log::models::DeviceLogRecord;
use punchsync_db::employee::models::EmployeeRef;
use punchsync_db::employee::repositories::IdentityLookup;
use punchsync_rules::{infer_direction, DirectionSource};

#[derive(Debug, Clone)]
pub struct Inference {
    pub employee: EmployeeRef,
    /// Latest checkin at query time; the guard reuses it for the debounce check.
    pub last: Option<LastCheckin>,
    pub direction: Direction,
}

/// Resolve the punch's employee and direction.
///
/// `Ok(None)` means the subject is not registered and the punch must be skipped
/// without touching any state.
pub async fn infer<I, H>(
    identity: &I,
    history: &H,
    source: DirectionSource,
    row: &DeviceLogRecord,
) -> PunchsyncResult<Option<Inference>>
where
    I: IdentityLookup,
    H: CheckinHistory,
{
    if row.subject_id.is_empty() {
        return Ok(None);
    }

    let employee = match identity
        .find_employee_by_device_subject_id(&row.subject_id)
        .await?
    {
        Some(e) => e,
        None => return Ok(None),
    };

    let last = history.most_recent(&employee).await?;
    let direction = infer_direction(
        source,
        last.map(|l| l.direction),
        row.direction_hint.as_deref(),
    );

    Ok(Some(Inference {
        employee,
        last,
        direction,
    }))
}
