//! v003: warmth_mode_changes.

use rusqlite::Connection;

use warmth_core::WarmthResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WarmthResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS warmth_mode_changes (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            entity_id     TEXT NOT NULL,
            from_mode     TEXT NOT NULL,
            to_mode       TEXT NOT NULL,
            amplitude     REAL NOT NULL,
            score_before  INTEGER NOT NULL,
            score_after   INTEGER NOT NULL,
            changed_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mode_changes_entity
            ON warmth_mode_changes(entity_id, changed_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
