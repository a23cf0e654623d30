use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A month-partitioned punch table, optionally schema-qualified.
///
/// Both parts are expected to be plain identifiers; they are quoted when rendered
/// into SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
    pub schema: Option<String>,
    pub name: String,
}

impl SourceTable {
    pub fn new(schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.map(str::to_owned),
            name: name.into(),
        }
    }

    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.name)),
            None => quote_ident(&self.name),
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// How period tables are named in a given source database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNaming {
    pub schema: Option<String>,
    pub prefix: String,
}

impl TableNaming {
    pub fn new(schema: Option<&str>, prefix: impl Into<String>) -> Self {
        Self {
            schema: schema.map(str::to_owned),
            prefix: prefix.into(),
        }
    }

    /// `<prefix>_<month>_<year>`, month not zero-padded.
    pub fn table(&self, month: u32, year: i32) -> SourceTable {
        SourceTable {
            schema: self.schema.clone(),
            name: format!("{}_{month}_{year}", self.prefix),
        }
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Columns carried through from the device software but unused by the sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogPassthrough {
    pub work_code: Option<String>,
    pub file_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location_address: Option<String>,
    pub body_temperature: Option<String>,
    pub is_mask_on: Option<String>,
}

/// One raw punch, normalized on fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceLogRecord {
    pub device_log_id: i64,
    pub download_date: Option<NaiveDateTime>,
    pub device_id: Option<i64>,
    /// Device user id, trimmed. Matches `employees.attendance_device_id`.
    pub subject_id: String,
    pub log_date: NaiveDateTime,
    pub direction: Option<String>,
    pub att_direction: Option<String>,
    /// Operator-maintained in/out hint (column `C1`), lowercased.
    pub direction_hint: Option<String>,
    pub passthrough: LogPassthrough,
}
