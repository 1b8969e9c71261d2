use chrono::{DateTime, Utc};

use crate::errors::WarmthResult;
use crate::models::ScoreCache;

/// Write path and lookups for the derived score cache.
pub trait IScoreCacheStore: Send + Sync {
    /// Upsert the cache row and append the same values to the entity's
    /// score history. Each call is an independent, complete unit.
    fn put_cache(&self, entry: &ScoreCache) -> WarmthResult<()>;

    fn get_cache(&self, entity_id: &str) -> WarmthResult<Option<ScoreCache>>;

    /// History snapshots with `cached_at >= since`, oldest first.
    fn history(&self, entity_id: &str, since: DateTime<Utc>) -> WarmthResult<Vec<ScoreCache>>;

    /// Delete history snapshots with `cached_at < before`; the current cache
    /// rows are untouched. Returns how many snapshots were removed.
    fn prune_history(&self, before: DateTime<Utc>) -> WarmthResult<usize>;

    /// Drop every cache row and history snapshot. Anchors are untouched.
    fn clear_cache(&self) -> WarmthResult<()>;
}
