use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Create,
    /// A checkin already exists at this exact time for the employee.
    SkipDuplicate,
    /// The previous checkin is closer than the debounce window.
    SkipDebounce,
}

impl GuardDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::SkipDuplicate => "skip_duplicate",
            Self::SkipDebounce => "skip_debounce",
        }
    }
}

/// Decide whether a punch at `at` should become a checkin.
///
/// `previous` is the employee's most recent checkin time. The window is exclusive:
/// a gap of exactly `debounce_secs` creates. A punch older than `previous` gives a
/// negative gap and is skipped too.
pub fn evaluate(
    exists: bool,
    previous: Option<NaiveDateTime>,
    at: NaiveDateTime,
    debounce_secs: i64,
) -> GuardDecision {
    if exists {
        return GuardDecision::SkipDuplicate;
    }

    if let Some(prev) = previous {
        if (at - prev).num_seconds() < debounce_secs {
            return GuardDecision::SkipDebounce;
        }
    }

    GuardDecision::Create
}
