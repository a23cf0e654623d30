use punchsync_common::types::Direction;

use crate::config::DirectionSource;

/// Strict two-state alternation: no history or last `OUT` gives `IN`, last `IN` gives `OUT`.
///
/// With [`DirectionSource::DeviceHint`] a hint reading `in`/`out` (any case) wins;
/// anything else falls back to alternation.
pub fn infer_direction(
    source: DirectionSource,
    last: Option<Direction>,
    hint: Option<&str>,
) -> Direction {
    if source == DirectionSource::DeviceHint {
        if let Some(d) = hint.and_then(hint_direction) {
            return d;
        }
    }

    last.map_or(Direction::In, Direction::flipped)
}

fn hint_direction(hint: &str) -> Option<Direction> {
    match hint.trim().to_ascii_lowercase().as_str() {
        "in" => Some(Direction::In),
        "out" => Some(Direction::Out),
        _ => None,
    }
}
