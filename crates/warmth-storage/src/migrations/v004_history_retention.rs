//! v004: index for age-based pruning of warmth_score_history.

use rusqlite::Connection;

use warmth_core::WarmthResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WarmthResult<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_score_history_cached_at
            ON warmth_score_history(cached_at);",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
