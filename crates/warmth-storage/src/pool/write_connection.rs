//! Single write connection. All anchor and cache writes serialize here.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use warmth_core::WarmthResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> WarmthResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> WarmthResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and run `f`. Must not be called from inside
    /// an async task; engine callers run on plain or rayon threads.
    pub fn with_conn_sync<F, T>(&self, f: F) -> WarmthResult<T>
    where
        F: FnOnce(&Connection) -> WarmthResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
