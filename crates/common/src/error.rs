use thiserror::Error;

#[derive(Debug, Error)]
pub enum PunchsyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("source query failed for {table}: {message}")]
    Source { table: String, message: String },

    #[error("no readable source table (tried {tried})")]
    SourceUnavailable { tried: String },

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl PunchsyncError {
    pub fn source_query(table: impl Into<String>, err: impl ToString) -> Self {
        Self::Source {
            table: table.into(),
            message: err.to_string(),
        }
    }
}

pub type PunchsyncResult<T> = Result<T, PunchsyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_names_the_table() {
        let err = PunchsyncError::source_query("DeviceLogs_3_2026", "relation does not exist");
        assert_eq!(
            err.to_string(),
            "source query failed for DeviceLogs_3_2026: relation does not exist"
        );
    }

    #[test]
    fn source_query_is_not_an_error_chain() {
        use std::error::Error as _;
        let err = PunchsyncError::source_query("DeviceLogs_3_2026", "statement timeout");
        assert!(err.source().is_none());
    }

    #[test]
    fn source_unavailable_lists_tried_tables() {
        let err = PunchsyncError::SourceUnavailable {
            tried: "DeviceLogs_1_2026, DeviceLogs_12_2025".to_owned(),
        };
        assert!(err.to_string().contains("DeviceLogs_12_2025"));
    }
}
