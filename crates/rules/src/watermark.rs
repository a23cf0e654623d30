use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const CURSOR_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Oldest timestamp the source's `datetime` columns can hold (1753-01-01).
pub fn min_source_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1753, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Turn the stored cursor into the exclusive lower bound for the next fetch.
///
/// Missing or unparsable values fall back to `now - lookback_days`, never later than
/// `now`; the result is never earlier than [`min_source_datetime`].
pub fn resolve_cursor(raw: Option<&str>, now: NaiveDateTime, lookback_days: i64) -> NaiveDateTime {
    let parsed = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| NaiveDateTime::parse_from_str(v, CURSOR_FORMAT).ok());

    let cursor = parsed.unwrap_or_else(|| default_cursor(now, lookback_days));
    cursor.max(min_source_datetime())
}

fn default_cursor(now: NaiveDateTime, lookback_days: i64) -> NaiveDateTime {
    Duration::try_days(lookback_days.max(0))
        .and_then(|back| now.checked_sub_signed(back))
        .unwrap_or_else(min_source_datetime)
}

pub fn format_cursor(at: NaiveDateTime) -> String {
    at.format(CURSOR_FORMAT).to_string()
}
