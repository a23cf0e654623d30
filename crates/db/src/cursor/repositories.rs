use async_trait::async_trait;

use punchsync_common::error::PunchsyncResult;

/// Persists the single sync watermark as `YYYY-MM-DD HH:MM:SS` text.
#[async_trait]
pub trait CursorStore: Send + Sync {
    async fn get(&self) -> PunchsyncResult<Option<String>>;
    async fn set(&self, value: &str) -> PunchsyncResult<()>;
}
