use chrono::{DateTime, NaiveDateTime, Utc};
use punchsync_common::types::Direction;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted, direction-classified attendance record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckinEvent {
    pub id: Uuid,
    pub employee_id: String,
    /// Punch time as reported by the device, not processing time.
    pub time: NaiveDateTime,
    pub direction: Direction,
    pub created_at: DateTime<Utc>,
}

/// The latest checkin of an employee, used for alternation and debounce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastCheckin {
    pub direction: Direction,
    pub time: NaiveDateTime,
}
