use std::str::FromStr;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use punchsync_common::types::Direction;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::checkin::models::{CheckinEvent, LastCheckin};
use crate::checkin::repositories::{CheckinHistory, CheckinSink};
use crate::employee::models::EmployeeRef;
use punchsync_common::error::{PunchsyncError, PunchsyncResult};

#[derive(Clone)]
pub struct PgCheckinRepository {
    pool: PgPool,
}

impl PgCheckinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_direction(row: &PgRow) -> PunchsyncResult<Direction> {
        let raw: String = row.get("log_type");
        Direction::from_str(&raw).map_err(PunchsyncError::Internal)
    }

    fn map_row(row: PgRow) -> PunchsyncResult<CheckinEvent> {
        Ok(CheckinEvent {
            direction: Self::parse_direction(&row)?,
            id: row.get("id"),
            employee_id: row.get("employee_id"),
            time: row.get("time"),
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl CheckinHistory for PgCheckinRepository {
    async fn most_recent(&self, employee: &EmployeeRef) -> PunchsyncResult<Option<LastCheckin>> {
        let row = sqlx::query(
            "select log_type, time from employee_checkins
             where employee_id = $1
             order by time desc
             limit 1",
        )
        .bind(&employee.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PunchsyncError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(LastCheckin {
                direction: Self::parse_direction(&r)?,
                time: r.get("time"),
            })),
            None => Ok(None),
        }
    }

    async fn exists(&self, employee: &EmployeeRef, time: NaiveDateTime) -> PunchsyncResult<bool> {
        let row = sqlx::query(
            "select exists(select 1 from employee_checkins where employee_id = $1 and time = $2) as found",
        )
        .bind(&employee.id)
        .bind(time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PunchsyncError::Database(e.to_string()))?;

        Ok(row.get("found"))
    }
}

#[async_trait]
impl CheckinSink for PgCheckinRepository {
    async fn create(
        &self,
        employee: &EmployeeRef,
        time: NaiveDateTime,
        direction: Direction,
    ) -> PunchsyncResult<CheckinEvent> {
        let row = sqlx::query(
            "insert into employee_checkins (id, employee_id, log_type, time, created_at)
             values ($1, $2, $3, $4, $5)
             on conflict (employee_id, time) do nothing
             returning id, employee_id, log_type, time, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&employee.id)
        .bind(direction.as_str())
        .bind(time)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PunchsyncError::Database(e.to_string()))?;

        match row {
            Some(r) => Self::map_row(r),
            None => Err(PunchsyncError::Database(format!(
                "checkin for {} at {time} was written concurrently",
                employee.id
            ))),
        }
    }
}
