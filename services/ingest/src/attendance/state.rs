use std::fmt;

use chrono::NaiveDateTime;
use punchsync_common::error::PunchsyncError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    ResolvingSource,
    Fetching,
    Processing,
    Committing,
    Aborted,
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ResolvingSource => "resolving_source",
            Self::Fetching => "fetching",
            Self::Processing => "processing",
            Self::Committing => "committing",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one sync run. `state` is `Idle` on success, `Aborted` otherwise.
#[derive(Debug)]
pub struct SyncReport {
    pub state: SyncState,
    pub table: Option<String>,
    pub fetched: usize,
    pub created: usize,
    pub skipped_unmatched: usize,
    pub skipped_duplicate: usize,
    pub skipped_debounce: usize,
    pub cursor_before: Option<NaiveDateTime>,
    pub cursor_after: Option<NaiveDateTime>,
    pub max_log_time: Option<NaiveDateTime>,
    pub error: Option<PunchsyncError>,
}

impl SyncReport {
    pub(crate) fn new() -> Self {
        Self {
            state: SyncState::Idle,
            table: None,
            fetched: 0,
            created: 0,
            skipped_unmatched: 0,
            skipped_duplicate: 0,
            skipped_debounce: 0,
            cursor_before: None,
            cursor_after: None,
            max_log_time: None,
            error: None,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_unmatched + self.skipped_duplicate + self.skipped_debounce
    }

    pub fn is_aborted(&self) -> bool {
        self.state == SyncState::Aborted
    }

    /// Did the watermark move during this run?
    pub fn advanced(&self) -> bool {
        match (self.cursor_before, self.cursor_after) {
            (Some(before), Some(after)) => after > before,
            _ => false,
        }
    }
}
