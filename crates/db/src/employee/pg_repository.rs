use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::employee::models::EmployeeRef;
use crate::employee::repositories::IdentityLookup;
use punchsync_common::error::{PunchsyncError, PunchsyncResult};

#[derive(Clone)]
pub struct PgEmployeeDirectory {
    pool: PgPool,
}

impl PgEmployeeDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityLookup for PgEmployeeDirectory {
    async fn find_employee_by_device_subject_id(
        &self,
        subject_id: &str,
    ) -> PunchsyncResult<Option<EmployeeRef>> {
        let row = sqlx::query(
            "select id, display_name from employees
             where attendance_device_id = $1
             order by id
             limit 1",
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PunchsyncError::Database(e.to_string()))?;

        Ok(row.map(|r| EmployeeRef {
            id: r.get("id"),
            display_name: r.get("display_name"),
        }))
    }
}
