use chrono::NaiveDateTime;
use punchsync_common::error::PunchsyncResult;
use punchsync_db::checkin::models::LastCheckin;
use punchsync_db::checkin::repositories::CheckinHistory;
use punchsync_db::employee::models::EmployeeRef;
use punchsync_rules::{evaluate, GuardDecision};

/// Exact-time duplicate check against the store, then the debounce window
/// against `last`.
pub async fn decide<H: CheckinHistory>(
    history: &H,
    employee: &EmployeeRef,
    at: NaiveDateTime,
    last: Option<&LastCheckin>,
    debounce_secs: i64,
) -> PunchsyncResult<GuardDecision> {
    let exists = history.exists(employee, at).await?;
    Ok(evaluate(exists, last.map(|l| l.time), at, debounce_secs))
}
