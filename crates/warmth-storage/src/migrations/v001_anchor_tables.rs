//! v001: warmth_anchors.

use rusqlite::Connection;

use warmth_core::WarmthResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WarmthResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS warmth_anchors (
            entity_id   TEXT PRIMARY KEY,
            amplitude   REAL NOT NULL CHECK (amplitude >= 0.0 AND amplitude <= 100.0),
            anchor_at   TEXT NOT NULL,
            mode        TEXT NOT NULL,
            version     INTEGER NOT NULL DEFAULT 1,
            updated_at  TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
