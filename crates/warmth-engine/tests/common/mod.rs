//! Store doubles for engine tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Mutex, OnceLock};

use chrono::{DateTime, Utc};
use warmth_core::errors::StorageError;
use warmth_core::models::{ModeChange, ScoreCache};
use warmth_core::traits::{IAnchorStore, IScoreCacheStore};
use warmth_core::{Anchor, VersionedAnchor, WarmthConfig, WarmthError, WarmthResult};
use warmth_engine::{SweepCancel, WarmthEngine};
use warmth_storage::InMemoryStore;

pub fn engine() -> (Arc<InMemoryStore>, WarmthEngine) {
    let store = Arc::new(InMemoryStore::new());
    let engine = WarmthEngine::with_store(Arc::clone(&store), &WarmthConfig::default()).unwrap();
    (store, engine)
}

pub fn fast_retry_config(attempts: u32) -> WarmthConfig {
    let mut config = WarmthConfig::default();
    config.engine.max_write_attempts = attempts;
    config.engine.retry_backoff_ms = 1;
    config.engine.max_retry_backoff_ms = 2;
    config
}

fn unavailable(what: &str) -> WarmthError {
    WarmthError::StorageError(StorageError::Unavailable {
        reason: format!("{what} unavailable"),
    })
}

/// In-memory store with switchable failures and hooks.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: InMemoryStore,
    pub failing_reads: Mutex<HashSet<String>>,
    pub fail_anchor_writes: AtomicBool,
    pub fail_cache_writes: AtomicBool,
    pub fail_listing: AtomicBool,
    pub fail_prune: AtomicBool,
    /// Cancelled right after the first cache write.
    pub cancel_on_cache_write: OnceLock<SweepCancel>,
    /// First cache write waits here twice: once on entry, once for release.
    pub gate: OnceLock<Arc<Barrier>>,
    gated: AtomicBool,
}

impl FaultyStore {
    pub fn fail_reads_for(&self, ids: &[&str]) {
        let mut set = self.failing_reads.lock().unwrap();
        set.clear();
        set.extend(ids.iter().map(|s| s.to_string()));
    }
}

impl IAnchorStore for FaultyStore {
    fn get_anchor(&self, entity_id: &str) -> WarmthResult<Option<VersionedAnchor>> {
        if self.failing_reads.lock().unwrap().contains(entity_id) {
            return Err(unavailable("anchor read"));
        }
        self.inner.get_anchor(entity_id)
    }

    fn put_anchor(&self, anchor: &Anchor, expected_version: Option<u64>) -> WarmthResult<u64> {
        if self.fail_anchor_writes.load(Ordering::SeqCst) {
            return Err(unavailable("anchor write"));
        }
        self.inner.put_anchor(anchor, expected_version)
    }

    fn list_entities(&self, after: Option<&str>, limit: usize) -> WarmthResult<Vec<String>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(unavailable("listing"));
        }
        self.inner.list_entities(after, limit)
    }

    fn count_anchors(&self) -> WarmthResult<usize> {
        self.inner.count_anchors()
    }

    fn record_mode_change(&self, change: &ModeChange) -> WarmthResult<()> {
        self.inner.record_mode_change(change)
    }

    fn mode_changes(&self, entity_id: &str) -> WarmthResult<Vec<ModeChange>> {
        self.inner.mode_changes(entity_id)
    }
}

impl IScoreCacheStore for FaultyStore {
    fn put_cache(&self, entry: &ScoreCache) -> WarmthResult<()> {
        if self.fail_cache_writes.load(Ordering::SeqCst) {
            return Err(unavailable("cache write"));
        }
        if let Some(gate) = self.gate.get() {
            if !self.gated.swap(true, Ordering::SeqCst) {
                gate.wait();
                gate.wait();
            }
        }
        self.inner.put_cache(entry)?;
        if let Some(cancel) = self.cancel_on_cache_write.get() {
            cancel.cancel();
        }
        Ok(())
    }

    fn get_cache(&self, entity_id: &str) -> WarmthResult<Option<ScoreCache>> {
        self.inner.get_cache(entity_id)
    }

    fn history(&self, entity_id: &str, since: DateTime<Utc>) -> WarmthResult<Vec<ScoreCache>> {
        self.inner.history(entity_id, since)
    }

    fn prune_history(&self, before: DateTime<Utc>) -> WarmthResult<usize> {
        if self.fail_prune.load(Ordering::SeqCst) {
            return Err(unavailable("history prune"));
        }
        self.inner.prune_history(before)
    }

    fn clear_cache(&self) -> WarmthResult<()> {
        self.inner.clear_cache()
    }
}
