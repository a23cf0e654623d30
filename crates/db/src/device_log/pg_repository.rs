use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{postgres::PgRow, PgConnection, Row};
use tokio::sync::Mutex;

use crate::device_log::models::{DeviceLogRecord, LogPassthrough, SourceTable, TableNaming};
use crate::device_log::repositories::DeviceLogSource;
use punchsync_common::error::{PunchsyncError, PunchsyncResult};

const SELECT_COLUMNS: &str = r#"
    "DeviceLogId"::bigint as device_log_id,
    "DownloadDate"::timestamp as download_date,
    "DeviceId"::bigint as device_id,
    "UserId"::text as user_id,
    "LogDate"::timestamp as log_date,
    "Direction"::text as direction,
    "AttDirection"::text as att_direction,
    "C1"::text as c1,
    "WorkCode"::text as work_code,
    "FileName"::text as file_name,
    "Latitude"::text as latitude,
    "Longitude"::text as longitude,
    "LocationAddress"::text as location_address,
    "BodyTemperature"::text as body_temperature,
    "IsMaskOn"::text as is_mask_on
"#;

/// One connection to the device-log database, held for a single run.
///
/// The connection is closed when the source is dropped.
pub struct PgDeviceLogSource {
    conn: Mutex<PgConnection>,
    naming: TableNaming,
}

impl PgDeviceLogSource {
    pub fn new(conn: PgConnection, naming: TableNaming) -> Self {
        Self {
            conn: Mutex::new(conn),
            naming,
        }
    }

    fn map_row(row: PgRow) -> DeviceLogRecord {
        let subject_id: Option<String> = row.get("user_id");
        DeviceLogRecord {
            device_log_id: row.get("device_log_id"),
            download_date: row.get("download_date"),
            device_id: row.get("device_id"),
            subject_id: subject_id.map(|s| s.trim().to_owned()).unwrap_or_default(),
            log_date: row.get("log_date"),
            direction: row.get("direction"),
            att_direction: row.get("att_direction"),
            direction_hint: row
                .get::<Option<String>, _>("c1")
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty()),
            passthrough: LogPassthrough {
                work_code: row.get("work_code"),
                file_name: row.get("file_name"),
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
                location_address: row.get("location_address"),
                body_temperature: row.get("body_temperature"),
                is_mask_on: row.get("is_mask_on"),
            },
        }
    }
}

#[async_trait]
impl DeviceLogSource for PgDeviceLogSource {
    fn naming(&self) -> &TableNaming {
        &self.naming
    }

    async fn probe(&self, table: &SourceTable) -> PunchsyncResult<()> {
        let sql = format!("select 1 from {} limit 1", table.quoted());
        let mut conn = self.conn.lock().await;
        sqlx::query(&sql)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| PunchsyncError::source_query(table.to_string(), e))?;
        Ok(())
    }

    async fn fetch_after(
        &self,
        table: &SourceTable,
        after: NaiveDateTime,
    ) -> PunchsyncResult<Vec<DeviceLogRecord>> {
        let sql = format!(
            r#"select {SELECT_COLUMNS} from {} where "LogDate" > $1 order by "LogDate" asc"#,
            table.quoted()
        );
        let mut conn = self.conn.lock().await;
        let rows = sqlx::query(&sql)
            .bind(after)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| PunchsyncError::source_query(table.to_string(), e))?;

        Ok(rows.into_iter().map(Self::map_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::postgres::PgConnectOptions;
    use std::str::FromStr;

    async fn test_source(table: &str) -> Option<PgDeviceLogSource> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let options = PgConnectOptions::from_str(&url).ok()?;
        let mut conn = crate::connect_source(&options, std::time::Duration::from_secs(5))
            .await
            .expect("source should connect");

        sqlx::query(&format!(
            r#"create table if not exists "{table}" (
               "DeviceLogId" serial primary key,
               "DownloadDate" timestamp,
               "DeviceId" integer,
               "UserId" varchar(50),
               "LogDate" timestamp not null,
               "Direction" varchar(10),
               "AttDirection" varchar(10),
               "C1" varchar(10),
               "WorkCode" varchar(10),
               "FileName" text,
               "Latitude" text,
               "Longitude" text,
               "LocationAddress" text,
               "BodyTemperature" text,
               "IsMaskOn" text
             )"#
        ))
        .execute(&mut conn)
        .await
        .ok()?;
        sqlx::query(&format!(r#"truncate "{table}""#))
            .execute(&mut conn)
            .await
            .ok()?;

        Some(PgDeviceLogSource::new(
            conn,
            TableNaming::new(None, "DeviceLogs"),
        ))
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn probe_fails_for_missing_table() {
        let source = match test_source("DeviceLogs_probe_tmp").await {
            Some(s) => s,
            None => return,
        };
        let missing = SourceTable::new(None, "DeviceLogs_13_1999");
        let err = source.probe(&missing).await.unwrap_err();
        assert!(err.to_string().contains("DeviceLogs_13_1999"), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_after_is_exclusive_and_ordered() {
        let name = "DeviceLogs_fetch_tmp";
        let source = match test_source(name).await {
            Some(s) => s,
            None => return,
        };
        {
            let mut conn = source.conn.lock().await;
            for (user, when, hint) in [
                (" 17 ", at(9, 30), Some("IN")),
                ("17", at(8, 0), None),
                ("42", at(9, 0), Some("")),
            ] {
                sqlx::query(&format!(
                    r#"insert into "{name}" ("UserId", "LogDate", "C1") values ($1, $2, $3)"#
                ))
                .bind(user)
                .bind(when)
                .bind(hint)
                .execute(&mut *conn)
                .await
                .expect("insert");
            }
        }

        let table = SourceTable::new(None, name);
        source.probe(&table).await.expect("probe");
        let rows = source.fetch_after(&table, at(8, 0)).await.expect("fetch");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].log_date, at(9, 0));
        assert_eq!(rows[0].direction_hint, None);
        assert_eq!(rows[1].subject_id, "17");
        assert_eq!(rows[1].direction_hint.as_deref(), Some("in"));
    }
}
