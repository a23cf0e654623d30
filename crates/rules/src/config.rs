use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a checkin's direction comes from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DirectionSource {
    /// Alternate from the employee's last known checkin.
    #[default]
    Inferred,
    /// Trust the device's hint column when it reads `in` or `out`.
    DeviceHint,
}

impl DirectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inferred => "inferred",
            Self::DeviceHint => "device-hint",
        }
    }
}

impl fmt::Display for DirectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectionSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inferred" => Ok(Self::Inferred),
            "device-hint" | "device_hint" => Ok(Self::DeviceHint),
            _ => Err(format!("unknown direction source: {value}")),
        }
    }
}

/// Upper bound accepted for `default_lookback_days` (about a century).
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Minimum gap between two checkins of one employee, by punch time.
    pub debounce_secs: i64,
    /// How far back to start when no usable cursor is stored.
    pub default_lookback_days: i64,
    pub direction_source: DirectionSource,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            debounce_secs: 1800,
            default_lookback_days: 2,
            direction_source: DirectionSource::Inferred,
        }
    }
}
