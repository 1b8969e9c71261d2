//! PRAGMA configuration applied to every SQLite connection.

use std::time::Duration;

use rusqlite::Connection;

use warmth_core::WarmthResult;

use crate::to_storage_err;

/// Pragmas for the write connection: WAL, NORMAL sync, busy timeout.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> WarmthResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -16000;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    set_busy_timeout(conn, busy_timeout_ms)
}

/// Pragmas for pooled read connections.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> WarmthResult<()> {
    conn.execute_batch("PRAGMA query_only = ON;")
        .map_err(|e| to_storage_err(e.to_string()))?;
    set_busy_timeout(conn, busy_timeout_ms)
}

fn set_busy_timeout(conn: &Connection, busy_timeout_ms: u32) -> WarmthResult<()> {
    conn.busy_timeout(Duration::from_millis(u64::from(busy_timeout_ms)))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> WarmthResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
