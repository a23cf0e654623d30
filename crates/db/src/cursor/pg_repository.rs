use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::cursor::repositories::CursorStore;
use punchsync_common::error::{PunchsyncError, PunchsyncResult};

/// Single-row settings table (`id = 1`) holding `last_sync_time`.
#[derive(Clone)]
pub struct PgCursorStore {
    pool: PgPool,
}

impl PgCursorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CursorStore for PgCursorStore {
    async fn get(&self) -> PunchsyncResult<Option<String>> {
        let row = sqlx::query("select last_sync_time from attendance_sync_settings where id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PunchsyncError::Database(e.to_string()))?;

        Ok(row.and_then(|r| r.get::<Option<String>, _>("last_sync_time")))
    }

    async fn set(&self, value: &str) -> PunchsyncResult<()> {
        sqlx::query(
            "insert into attendance_sync_settings (id, last_sync_time, updated_at)
             values (1, $1, now())
             on conflict (id) do update set last_sync_time = excluded.last_sync_time, updated_at = now()",
        )
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| PunchsyncError::Database(e.to_string()))?;

        Ok(())
    }
}
