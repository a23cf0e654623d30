use punchsync_common::error::{PunchsyncError, PunchsyncResult};
use punchsync_rules::{DirectionSource, RulesConfig, MAX_LOOKBACK_DAYS};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Target attendance store.
    pub database_url: String,
    pub sync: SyncSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncSettings {
    pub interval_secs: u64,
    pub run_once: bool,
    pub rules: RulesConfig,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            interval_secs: 600,
            run_once: false,
            rules: RulesConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> PunchsyncResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: get_var("DATABASE_URL")?,
            sync: SyncSettings::from_env()?,
        })
    }
}

impl SyncSettings {
    pub fn from_env() -> PunchsyncResult<Self> {
        let defaults = Self::default();
        let rule_defaults = defaults.rules;

        let interval_secs = parse_var_or("SYNC_INTERVAL_SECS", defaults.interval_secs)?;
        if interval_secs == 0 {
            return Err(PunchsyncError::Config(
                "SYNC_INTERVAL_SECS must be greater than zero".to_owned(),
            ));
        }

        let debounce_secs = parse_var_or("SYNC_DEBOUNCE_SECS", rule_defaults.debounce_secs)?;
        if debounce_secs < 0 {
            return Err(PunchsyncError::Config(
                "SYNC_DEBOUNCE_SECS must not be negative".to_owned(),
            ));
        }

        let default_lookback_days = parse_var_or(
            "SYNC_DEFAULT_LOOKBACK_DAYS",
            rule_defaults.default_lookback_days,
        )?;
        if !(1..=MAX_LOOKBACK_DAYS).contains(&default_lookback_days) {
            return Err(PunchsyncError::Config(format!(
                "SYNC_DEFAULT_LOOKBACK_DAYS must be between 1 and {MAX_LOOKBACK_DAYS}, got {default_lookback_days}"
            )));
        }

        let direction_source = match env::var("SYNC_DIRECTION_SOURCE") {
            Ok(raw) => DirectionSource::from_str(&raw)
                .map_err(|e| PunchsyncError::Config(format!("invalid SYNC_DIRECTION_SOURCE: {e}")))?,
            Err(_) => rule_defaults.direction_source,
        };

        Ok(Self {
            interval_secs,
            run_once: parse_var_or("SYNC_RUN_ONCE", defaults.run_once)?,
            rules: RulesConfig {
                debounce_secs,
                default_lookback_days,
                direction_source,
            },
        })
    }
}

pub(crate) fn get_var(key: &str) -> PunchsyncResult<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PunchsyncError::Config(format!("{key} is required but not set")))
}

pub(crate) fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

pub(crate) fn parse_var_or<T>(key: &str, default: T) -> PunchsyncResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| PunchsyncError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
