use std::fmt;
use std::time::Duration;

use punchsync_common::error::{PunchsyncError, PunchsyncResult};

use crate::env::{get_var, get_var_or, parse_var_or};

/// Connection parameters for the device-log database.
#[derive(Clone)]
pub struct SourceConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub schema: Option<String>,
    pub table_prefix: String,
    pub connect_timeout: Duration,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("table_prefix", &self.table_prefix)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl SourceConfig {
    /// Read `ATTENDANCE_DB_*` variables. Every connection parameter is required and
    /// the port must be an integer; nothing is attempted on failure.
    pub fn from_env() -> PunchsyncResult<Self> {
        let port_raw = get_var("ATTENDANCE_DB_PORT")?;
        let port = port_raw.trim().parse::<u16>().map_err(|e| {
            PunchsyncError::Config(format!("invalid ATTENDANCE_DB_PORT {port_raw:?}: {e}"))
        })?;

        let schema = std::env::var("ATTENDANCE_DB_SCHEMA")
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());

        let config = Self {
            host: get_var("ATTENDANCE_DB_HOST")?,
            port,
            user: get_var("ATTENDANCE_DB_USER")?,
            password: get_var("ATTENDANCE_DB_PASSWORD")?,
            database: get_var("ATTENDANCE_DB_NAME")?,
            schema,
            table_prefix: get_var_or("ATTENDANCE_TABLE_PREFIX", "DeviceLogs"),
            connect_timeout: Duration::from_secs(parse_var_or(
                "ATTENDANCE_CONNECT_TIMEOUT_SECS",
                15u64,
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    /// Table names are interpolated into SQL, so prefix and schema must be plain identifiers.
    pub fn validate(&self) -> PunchsyncResult<()> {
        if !is_plain_identifier(&self.table_prefix) {
            return Err(PunchsyncError::Config(format!(
                "ATTENDANCE_TABLE_PREFIX {:?} is not a plain identifier",
                self.table_prefix
            )));
        }
        if let Some(schema) = &self.schema {
            if !is_plain_identifier(schema) {
                return Err(PunchsyncError::Config(format!(
                    "ATTENDANCE_DB_SCHEMA {schema:?} is not a plain identifier"
                )));
            }
        }
        if self.connect_timeout.is_zero() {
            return Err(PunchsyncError::Config(
                "ATTENDANCE_CONNECT_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

fn is_plain_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
