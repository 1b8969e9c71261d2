//! Batch Recomputer: pagination, idempotence, failure isolation,
//! cancellation, single-run guard and alerts.

mod common;

use std::sync::atomic::Ordering;
use std::sync::{Arc, Barrier};

use chrono::{Duration, TimeZone, Utc};
use warmth_core::traits::{IAnchorStore, IScoreCacheStore};
use warmth_core::{Anchor, Band, DecayMode, InteractionKind, WarmthConfig, WarmthError};
use warmth_engine::{SweepOptions, WarmthEngine};

use common::{engine, FaultyStore};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

fn opts(batch_size: usize, concurrency: usize) -> SweepOptions {
    SweepOptions {
        batch_size,
        concurrency,
    }
}

fn seed(store: &dyn IAnchorStore, count: usize) {
    for i in 0..count {
        let anchor = Anchor::new(format!("e-{i:03}"), (i % 70) as f64, t0(), DecayMode::Medium);
        store.put_anchor(&anchor, None).unwrap();
    }
}

// ── Coverage & pagination ───────────────────────────────────────────────

#[test]
fn sweep_refreshes_every_entity_across_pages() {
    let (store, engine) = engine();
    seed(store.as_ref(), 23);

    let now = t0() + Duration::days(2);
    let report = engine.sweep_with(opts(5, 3), now).unwrap();
    assert_eq!(report.processed, 23);
    assert_eq!(report.failed, 0);
    assert_eq!(report.skipped, 0);
    assert!(!report.cancelled);
    assert!(!report.run_id.is_empty());
    assert_eq!(report.started_at, Some(now));

    for i in 0..23 {
        let id = format!("e-{i:03}");
        let cached = store.get_cache(&id).unwrap().unwrap();
        let live = engine.current_score_at(&id, now).unwrap();
        assert_eq!(cached.score, live.score, "{id}");
        assert_eq!(cached.band, live.band, "{id}");
        assert_eq!(cached.cached_at, now);
    }
}

#[test]
fn page_size_matching_entity_count_terminates() {
    let (store, engine) = engine();
    seed(store.as_ref(), 10);
    let report = engine.sweep_with(opts(5, 2), t0()).unwrap();
    assert_eq!(report.processed, 10);
}

#[test]
fn empty_store_sweeps_cleanly() {
    let (_, engine) = engine();
    let report = engine.sweep_with(opts(10, 2), t0()).unwrap();
    assert_eq!(report.total_seen(), 0);
}

// ── Idempotence & anchors untouched ─────────────────────────────────────

#[test]
fn repeated_sweeps_produce_identical_cache() {
    let (store, engine) = engine();
    seed(store.as_ref(), 12);
    let now = t0() + Duration::days(9);

    engine.sweep_with(opts(4, 4), now).unwrap();
    let first: Vec<_> = (0..12)
        .map(|i| store.get_cache(&format!("e-{i:03}")).unwrap().unwrap())
        .collect();

    engine.sweep_with(opts(7, 1), now).unwrap();
    let second: Vec<_> = (0..12)
        .map(|i| store.get_cache(&format!("e-{i:03}")).unwrap().unwrap())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn sweep_never_writes_anchors() {
    let (store, engine) = engine();
    seed(store.as_ref(), 6);
    let before: Vec<_> = (0..6)
        .map(|i| store.get_anchor(&format!("e-{i:03}")).unwrap().unwrap())
        .collect();

    engine.sweep_with(opts(2, 2), t0() + Duration::days(30)).unwrap();

    let after: Vec<_> = (0..6)
        .map(|i| store.get_anchor(&format!("e-{i:03}")).unwrap().unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn cache_can_be_dropped_and_rebuilt() {
    let (store, engine) = engine();
    seed(store.as_ref(), 4);
    let now = t0() + Duration::days(1);
    engine.sweep_with(opts(10, 2), now).unwrap();
    let before = store.get_cache("e-003").unwrap();

    store.clear_cache().unwrap();
    assert!(store.get_cache("e-003").unwrap().is_none());

    engine.sweep_with(opts(10, 2), now).unwrap();
    assert_eq!(store.get_cache("e-003").unwrap(), before);
}

// ── Failure isolation ───────────────────────────────────────────────────

#[test]
fn per_entity_failures_are_counted_not_fatal() {
    let store = Arc::new(FaultyStore::default());
    let engine = WarmthEngine::with_store(Arc::clone(&store), &WarmthConfig::default()).unwrap();
    seed(&store.inner, 8);
    store.fail_reads_for(&["e-002", "e-005"]);

    let report = engine.sweep_with(opts(3, 2), t0()).unwrap();
    assert_eq!(report.processed, 6);
    assert_eq!(report.failed, 2);
    assert!(store.get_cache("e-002").unwrap().is_none());
    assert!(store.get_cache("e-007").unwrap().is_some());

    // Next run picks up what failed.
    store.fail_reads_for(&[]);
    let report = engine.sweep_with(opts(3, 2), t0()).unwrap();
    assert_eq!((report.processed, report.failed), (8, 0));
    assert!(store.get_cache("e-002").unwrap().is_some());
    assert_eq!(engine.metrics().entities_failed, 2);
}

#[test]
fn listing_failure_aborts_the_run() {
    let store = Arc::new(FaultyStore::default());
    let engine = WarmthEngine::with_store(Arc::clone(&store), &WarmthConfig::default()).unwrap();
    seed(&store.inner, 3);
    store.fail_listing.store(true, Ordering::SeqCst);

    let err = engine.sweep_with(opts(10, 1), t0()).unwrap_err();
    assert!(matches!(err, WarmthError::StorageError(_)));
    assert!(!engine.is_sweep_running());
}

#[test]
fn zero_batch_size_is_rejected() {
    let (_, engine) = engine();
    assert!(matches!(
        engine.sweep_with(opts(0, 1), t0()).unwrap_err(),
        WarmthError::InvalidInput { .. }
    ));
    assert!(!engine.is_sweep_running());
}

// ── Cancellation & single-run guard ─────────────────────────────────────

#[test]
fn cancellation_stops_between_entities() {
    let store = Arc::new(FaultyStore::default());
    let engine = WarmthEngine::with_store(Arc::clone(&store), &WarmthConfig::default()).unwrap();
    seed(&store.inner, 5);
    let _ = store.cancel_on_cache_write.set(engine.cancel_handle());

    let report = engine.sweep_with(opts(10, 1), t0()).unwrap();
    assert!(report.cancelled);
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 4);

    // The row written before cancellation stays valid.
    let written: Vec<_> = (0..5)
        .filter_map(|i| store.get_cache(&format!("e-{i:03}")).unwrap())
        .collect();
    assert_eq!(written.len(), 1);
    let live = engine.current_score_at(&written[0].entity_id, t0()).unwrap();
    assert_eq!(written[0].score, live.score);
    assert_eq!(engine.metrics().sweeps_cancelled, 1);
}

#[test]
fn cancellation_does_not_leak_into_next_sweep() {
    let (store, engine) = engine();
    seed(store.as_ref(), 3);
    engine.cancel_handle().cancel();
    let report = engine.sweep_with(opts(10, 2), t0()).unwrap();
    assert!(!report.cancelled);
    assert_eq!(report.processed, 3);
}

#[test]
fn only_one_sweep_runs_at_a_time() {
    let store = Arc::new(FaultyStore::default());
    let engine = Arc::new(
        WarmthEngine::with_store(Arc::clone(&store), &WarmthConfig::default()).unwrap(),
    );
    seed(&store.inner, 2);
    let gate = Arc::new(Barrier::new(2));
    let _ = store.gate.set(Arc::clone(&gate));

    let background = {
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || engine.sweep_with(opts(10, 1), t0()))
    };

    // Background sweep is parked inside its first cache write.
    gate.wait();
    assert!(engine.is_sweep_running());
    let err = engine.sweep_with(opts(10, 1), t0()).unwrap_err();
    assert!(matches!(err, WarmthError::SweepInProgress));
    gate.wait();

    let report = background.join().unwrap().unwrap();
    assert_eq!(report.processed, 2);
    assert!(!engine.is_sweep_running());
}

// ── Alerts ──────────────────────────────────────────────────────────────

#[test]
fn cooling_into_alert_band_alerts_once() {
    let (_, engine) = engine();
    engine.apply_impulse("c", InteractionKind::Meeting, t0()).unwrap();
    engine.apply_impulse("c", InteractionKind::Call, t0()).unwrap();
    // 16 amplitude: neutral (46) at t0.
    let report = engine.sweep_with(opts(10, 1), t0()).unwrap();
    assert!(report.alerts.is_empty());
    assert_eq!(engine.current_score_at("c", t0()).unwrap().band, Band::Neutral);

    let later = t0() + Duration::days(10);
    let report = engine.sweep_with(opts(10, 1), later).unwrap();
    assert_eq!(report.alerts.len(), 1);
    let alert = &report.alerts[0];
    assert_eq!(alert.entity_id, "c");
    assert_eq!(alert.previous_band, Band::Neutral);
    assert_eq!(alert.band, Band::Cool);
    assert_eq!(alert.at, later);

    let report = engine
        .sweep_with(opts(10, 1), later + Duration::days(1))
        .unwrap();
    assert!(report.alerts.is_empty());
}

#[test]
fn configured_sweep_uses_config_values() {
    let store = Arc::new(warmth_storage::InMemoryStore::new());
    let config = WarmthConfig::from_toml("[sweep]\nbatch_size = 2\nconcurrency = 1\n").unwrap();
    let engine = WarmthEngine::with_store(Arc::clone(&store), &config).unwrap();
    seed(store.as_ref(), 5);
    let report = engine.sweep().unwrap();
    assert_eq!(report.processed, 5);
    assert_eq!(engine.metrics().sweeps_completed, 1);
}

// ── Page limits ─────────────────────────────────────────────────────────

#[test]
fn batch_size_above_store_page_limit_still_covers_everyone() {
    let (store, engine) = engine();
    let total = warmth_core::constants::MAX_PAGE_SIZE + 5;
    seed(store.as_ref(), total);

    let report = engine.sweep_with(opts(20_000, 2), t0()).unwrap();
    assert_eq!(report.processed, total);
    assert_eq!(report.failed, 0);
    assert!(!report.cancelled);
    let last = format!("e-{:03}", total - 1);
    assert!(store.get_cache(&last).unwrap().is_some());
}

// ── History retention ───────────────────────────────────────────────────

#[test]
fn sweep_prunes_history_beyond_longest_window() {
    let (store, engine) = engine();
    seed(store.as_ref(), 2);
    let now = t0() + Duration::days(200);
    for days_ago in [150, 91, 89, 10] {
        engine
            .refresh_entity("e-000", now - Duration::days(days_ago))
            .unwrap();
    }

    let report = engine.sweep_with(opts(10, 1), now).unwrap();
    assert_eq!(report.history_pruned, 2);

    let kept = store.history("e-000", t0() - Duration::days(1000)).unwrap();
    let ages: Vec<i64> = kept.iter().map(|e| (now - e.cached_at).num_days()).collect();
    assert_eq!(ages, vec![89, 10, 0]);
}

#[test]
fn cancelled_sweep_leaves_history_alone() {
    let store = Arc::new(FaultyStore::default());
    let engine = WarmthEngine::with_store(Arc::clone(&store), &WarmthConfig::default()).unwrap();
    seed(&store.inner, 3);
    let now = t0() + Duration::days(200);
    engine.refresh_entity("e-001", t0()).unwrap();
    let _ = store.cancel_on_cache_write.set(engine.cancel_handle());

    let report = engine.sweep_with(opts(10, 1), now).unwrap();
    assert!(report.cancelled);
    assert_eq!(report.history_pruned, 0);
    assert_eq!(store.history("e-001", t0()).unwrap().len(), 1);
}

#[test]
fn prune_failure_does_not_fail_the_sweep() {
    let store = Arc::new(FaultyStore::default());
    let engine = WarmthEngine::with_store(Arc::clone(&store), &WarmthConfig::default()).unwrap();
    seed(&store.inner, 3);
    store.fail_prune.store(true, Ordering::SeqCst);

    let report = engine.sweep_with(opts(10, 2), t0()).unwrap();
    assert_eq!(report.processed, 3);
    assert_eq!(report.history_pruned, 0);
}

// ── Materialization vs. sweep rows ──────────────────────────────────────

#[test]
fn older_impulse_does_not_overwrite_newer_sweep_row() {
    let (store, engine) = engine();
    engine.apply_impulse("c", InteractionKind::Call, t0()).unwrap();
    let swept_at = t0() + Duration::days(5);
    engine.sweep_with(opts(10, 1), swept_at).unwrap();
    let swept = store.get_cache("c").unwrap().unwrap();

    // Later than the anchor, earlier than the sweep.
    engine
        .apply_impulse("c", InteractionKind::Meeting, t0() + Duration::days(1))
        .unwrap();
    assert_eq!(store.get_cache("c").unwrap().unwrap(), swept);

    // A newer impulse replaces it.
    let fresh = t0() + Duration::days(6);
    engine.apply_impulse("c", InteractionKind::Email, fresh).unwrap();
    assert_eq!(store.get_cache("c").unwrap().unwrap().cached_at, fresh);
}
