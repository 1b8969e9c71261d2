//! In-memory store over `DashMap`. Same contracts and CAS semantics as the
//! SQLite engine, no durability.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use warmth_core::constants::MAX_PAGE_SIZE;
use warmth_core::models::{ModeChange, ScoreCache};
use warmth_core::traits::{IAnchorStore, IScoreCacheStore};
use warmth_core::{Anchor, VersionedAnchor, WarmthError, WarmthResult};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    anchors: DashMap<String, VersionedAnchor>,
    cache: DashMap<String, ScoreCache>,
    history: DashMap<String, Vec<ScoreCache>>,
    mode_log: DashMap<String, Vec<ModeChange>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IAnchorStore for InMemoryStore {
    fn get_anchor(&self, entity_id: &str) -> WarmthResult<Option<VersionedAnchor>> {
        Ok(self.anchors.get(entity_id).map(|r| r.clone()))
    }

    fn put_anchor(&self, anchor: &Anchor, expected_version: Option<u64>) -> WarmthResult<u64> {
        match (self.anchors.entry(anchor.entity_id.clone()), expected_version) {
            (Entry::Vacant(slot), None) => {
                slot.insert(VersionedAnchor {
                    anchor: anchor.clone(),
                    version: 1,
                });
                Ok(1)
            }
            (Entry::Occupied(mut slot), Some(expected)) if slot.get().version == expected => {
                let version = expected + 1;
                slot.insert(VersionedAnchor {
                    anchor: anchor.clone(),
                    version,
                });
                Ok(version)
            }
            _ => Err(WarmthError::ConcurrencyConflict {
                entity_id: anchor.entity_id.clone(),
                expected_version,
            }),
        }
    }

    fn list_entities(&self, after: Option<&str>, limit: usize) -> WarmthResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .anchors
            .iter()
            .map(|r| r.key().clone())
            .filter(|id| after.map_or(true, |a| id.as_str() > a))
            .collect();
        ids.sort_unstable();
        ids.truncate(limit.min(MAX_PAGE_SIZE));
        Ok(ids)
    }

    fn count_anchors(&self) -> WarmthResult<usize> {
        Ok(self.anchors.len())
    }

    fn record_mode_change(&self, change: &ModeChange) -> WarmthResult<()> {
        self.mode_log
            .entry(change.entity_id.clone())
            .or_default()
            .push(change.clone());
        Ok(())
    }

    fn mode_changes(&self, entity_id: &str) -> WarmthResult<Vec<ModeChange>> {
        Ok(self
            .mode_log
            .get(entity_id)
            .map(|r| r.clone())
            .unwrap_or_default())
    }
}

impl IScoreCacheStore for InMemoryStore {
    fn put_cache(&self, entry: &ScoreCache) -> WarmthResult<()> {
        self.cache.insert(entry.entity_id.clone(), entry.clone());
        self.history
            .entry(entry.entity_id.clone())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    fn get_cache(&self, entity_id: &str) -> WarmthResult<Option<ScoreCache>> {
        Ok(self.cache.get(entity_id).map(|r| r.clone()))
    }

    fn history(&self, entity_id: &str, since: DateTime<Utc>) -> WarmthResult<Vec<ScoreCache>> {
        let mut out: Vec<ScoreCache> = self
            .history
            .get(entity_id)
            .map(|r| r.iter().filter(|e| e.cached_at >= since).cloned().collect())
            .unwrap_or_default();
        out.sort_by_key(|e| e.cached_at);
        Ok(out)
    }

    fn prune_history(&self, before: DateTime<Utc>) -> WarmthResult<usize> {
        let mut removed = 0;
        for mut snapshots in self.history.iter_mut() {
            let len = snapshots.len();
            snapshots.retain(|e| e.cached_at >= before);
            removed += len - snapshots.len();
        }
        self.history.retain(|_, snapshots| !snapshots.is_empty());
        Ok(removed)
    }

    fn clear_cache(&self) -> WarmthResult<()> {
        self.cache.clear();
        self.history.clear();
        Ok(())
    }
}
