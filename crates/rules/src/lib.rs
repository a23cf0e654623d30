pub mod config;
pub mod direction;
pub mod guard;
pub mod period;
pub mod watermark;

pub use config::{DirectionSource, RulesConfig, MAX_LOOKBACK_DAYS};
pub use direction::infer_direction;
pub use guard::{evaluate, GuardDecision};
pub use period::{PeriodTables, SourcePeriod};
pub use watermark::{format_cursor, min_source_datetime, resolve_cursor};
