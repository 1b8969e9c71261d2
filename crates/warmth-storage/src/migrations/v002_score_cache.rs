//! v002: warmth_score_cache, warmth_score_history.

use rusqlite::Connection;

use warmth_core::WarmthResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WarmthResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS warmth_score_cache (
            entity_id   TEXT PRIMARY KEY,
            score       INTEGER NOT NULL CHECK (score >= 0 AND score <= 100),
            band        TEXT NOT NULL,
            cached_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_score_cache_score ON warmth_score_cache(score);
        CREATE INDEX IF NOT EXISTS idx_score_cache_band ON warmth_score_cache(band);

        CREATE TABLE IF NOT EXISTS warmth_score_history (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_id   TEXT NOT NULL,
            score       INTEGER NOT NULL,
            band        TEXT NOT NULL,
            cached_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_score_history_entity
            ON warmth_score_history(entity_id, cached_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
