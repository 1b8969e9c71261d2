//! StorageEngine: owns the ConnectionPool, implements IAnchorStore and
//! IScoreCacheStore, runs migrations at startup.

use std::path::Path;

use chrono::{DateTime, Utc};

use warmth_core::config::StorageConfig;
use warmth_core::models::{ModeChange, ScoreCache};
use warmth_core::traits::{IAnchorStore, IScoreCacheStore};
use warmth_core::{Anchor, VersionedAnchor, WarmthResult};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{anchor_ops, cache_ops, mode_change_ops};

/// SQLite-backed anchor store and score cache.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// File-backed mode reads through the pool. In-memory mode routes reads
    /// through the writer because pooled in-memory connections are separate
    /// databases.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> WarmthResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open using pool size and busy timeout from configuration.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> WarmthResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> WarmthResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> WarmthResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            let version = migrations::run_migrations(conn)?;
            tracing::info!(schema_version = version, "warmth storage ready");
            Ok(())
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> WarmthResult<u32> {
        self.pool.writer.with_conn_sync(migrations::current_version)
    }

    fn with_reader<F, T>(&self, f: F) -> WarmthResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> WarmthResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IAnchorStore for StorageEngine {
    fn get_anchor(&self, entity_id: &str) -> WarmthResult<Option<VersionedAnchor>> {
        self.with_reader(|conn| anchor_ops::get_anchor(conn, entity_id))
    }

    fn put_anchor(&self, anchor: &Anchor, expected_version: Option<u64>) -> WarmthResult<u64> {
        self.pool
            .writer
            .with_conn_sync(|conn| anchor_ops::put_anchor(conn, anchor, expected_version))
    }

    fn list_entities(&self, after: Option<&str>, limit: usize) -> WarmthResult<Vec<String>> {
        self.with_reader(|conn| anchor_ops::list_entities(conn, after, limit))
    }

    fn count_anchors(&self) -> WarmthResult<usize> {
        self.with_reader(anchor_ops::count_anchors)
    }

    fn record_mode_change(&self, change: &ModeChange) -> WarmthResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| mode_change_ops::insert(conn, change))
    }

    fn mode_changes(&self, entity_id: &str) -> WarmthResult<Vec<ModeChange>> {
        self.with_reader(|conn| mode_change_ops::for_entity(conn, entity_id))
    }
}

impl IScoreCacheStore for StorageEngine {
    fn put_cache(&self, entry: &ScoreCache) -> WarmthResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| cache_ops::put_cache(conn, entry))
    }

    fn get_cache(&self, entity_id: &str) -> WarmthResult<Option<ScoreCache>> {
        self.with_reader(|conn| cache_ops::get_cache(conn, entity_id))
    }

    fn history(&self, entity_id: &str, since: DateTime<Utc>) -> WarmthResult<Vec<ScoreCache>> {
        self.with_reader(|conn| cache_ops::history(conn, entity_id, since))
    }

    fn prune_history(&self, before: DateTime<Utc>) -> WarmthResult<usize> {
        self.pool
            .writer
            .with_conn_sync(|conn| cache_ops::prune_history(conn, before))
    }

    fn clear_cache(&self) -> WarmthResult<()> {
        self.pool.writer.with_conn_sync(cache_ops::clear_cache)
    }
}
