//! Versioned schema migrations, applied in order at startup.

mod v001_anchor_tables;
mod v002_score_cache;
mod v003_mode_change_log;
mod v004_history_retention;

use rusqlite::Connection;

use warmth_core::errors::StorageError;
use warmth_core::WarmthResult;

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> WarmthResult<()>;

const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_anchor_tables::migrate),
    (2, v002_score_cache::migrate),
    (3, v003_mode_change_log::migrate),
    (4, v004_history_retention::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 4;

/// Apply every migration newer than the recorded schema version. Each
/// migration commits together with its version row.
pub fn run_migrations(conn: &Connection) -> WarmthResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration {version} begin: {e}")))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
            .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit()
            .map_err(|e| to_storage_err(format!("migration {version} commit: {e}")))?;
        tracing::debug!(version, "applied schema migration");
    }
    current_version(conn)
}

pub fn current_version(conn: &Connection) -> WarmthResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
