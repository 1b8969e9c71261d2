//! Batch Recomputer: refresh the score cache for every anchored entity.
//!
//! Anchors are only read. Each entity is an independent unit: a failure is
//! counted and the sweep moves on, cancellation leaves already-written
//! cache rows valid.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, warn};

use warmth_core::constants::MAX_PAGE_SIZE;
use warmth_core::models::{HistoryWindow, ScoreCache, SweepReport, WarmthAlert};
use warmth_core::traits::{IAnchorStore, IScoreCacheStore};
use warmth_core::{WarmthError, WarmthResult};
use warmth_decay::ModeRegistry;
use warmth_observability::sweep_span;

use crate::alerts::AlertPolicy;
use crate::reader;

/// Page size and worker count for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOptions {
    pub batch_size: usize,
    pub concurrency: usize,
}

/// Result of refreshing one entity's cache row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refreshed {
    pub entry: ScoreCache,
    pub previous: Option<ScoreCache>,
}

enum Outcome {
    Processed(Option<WarmthAlert>),
    Failed,
    Skipped,
}

/// Recompute and store the cache row for one entity at `now`.
pub fn refresh_entity(
    anchors: &dyn IAnchorStore,
    cache: &dyn IScoreCacheStore,
    registry: &ModeRegistry,
    entity_id: &str,
    now: DateTime<Utc>,
) -> WarmthResult<Refreshed> {
    let previous = cache.get_cache(entity_id)?;
    let current = reader::current_score(anchors, registry, entity_id, now)?;
    let entry = ScoreCache::from_current(entity_id, &current, now);
    cache.put_cache(&entry)?;
    Ok(Refreshed { entry, previous })
}

/// Walk all anchored entities in `batch_size` pages and refresh each one on
/// a pool of `concurrency` threads. `cancel` is checked before every entity.
///
/// Listing a page is the only fatal failure; per-entity errors are counted
/// in `failed`. A run that is not cancelled finishes by pruning history
/// snapshots older than the longest history window.
pub fn sweep(
    anchors: &dyn IAnchorStore,
    cache: &dyn IScoreCacheStore,
    registry: &ModeRegistry,
    alerts: &AlertPolicy,
    options: SweepOptions,
    cancel: &AtomicBool,
    now: DateTime<Utc>,
) -> WarmthResult<SweepReport> {
    if options.batch_size == 0 || options.concurrency == 0 {
        return Err(WarmthError::InvalidInput {
            reason: "sweep batch size and concurrency must be at least 1".to_string(),
        });
    }

    let run_id = uuid::Uuid::new_v4().to_string();
    let _span = sweep_span!(run_id, options.batch_size, options.concurrency).entered();
    let started = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.concurrency)
        .thread_name(|i| format!("warmth-sweep-{i}"))
        .build()
        .map_err(|e| WarmthError::ConfigError {
            reason: format!("sweep thread pool: {e}"),
        })?;

    let mut report = SweepReport {
        run_id,
        started_at: Some(now),
        ..SweepReport::default()
    };
    // Stores never return more than MAX_PAGE_SIZE ids per call.
    let page_size = options.batch_size.min(MAX_PAGE_SIZE);
    let mut cursor: Option<String> = None;

    loop {
        let page = anchors.list_entities(cursor.as_deref(), page_size)?;
        if page.is_empty() {
            break;
        }

        let outcomes: Vec<Outcome> = pool.install(|| {
            page.par_iter()
                .map(|entity_id| {
                    if cancel.load(Ordering::Relaxed) {
                        return Outcome::Skipped;
                    }
                    match refresh_entity(anchors, cache, registry, entity_id, now) {
                        Ok(refreshed) => {
                            Outcome::Processed(alerts.evaluate(refreshed.previous.as_ref(), &refreshed.entry))
                        }
                        Err(err) => {
                            warn!(entity_id = %entity_id, error = %err, "entity refresh failed");
                            Outcome::Failed
                        }
                    }
                })
                .collect()
        });

        for outcome in outcomes {
            match outcome {
                Outcome::Processed(alert) => {
                    report.processed += 1;
                    report.alerts.extend(alert);
                }
                Outcome::Failed => report.failed += 1,
                Outcome::Skipped => report.skipped += 1,
            }
        }

        if cancel.load(Ordering::Relaxed) {
            report.cancelled = true;
            break;
        }
        if page.len() < page_size {
            break;
        }
        cursor = page.last().cloned();
    }

    if !report.cancelled {
        let cutoff = now - HistoryWindow::LONGEST.duration();
        match cache.prune_history(cutoff) {
            Ok(removed) => report.history_pruned = removed,
            Err(err) => warn!(error = %err, "score history prune failed"),
        }
    }

    report.duration_ms = started.elapsed().as_millis() as u64;
    info!(
        processed = report.processed,
        failed = report.failed,
        skipped = report.skipped,
        alerts = report.alerts.len(),
        cancelled = report.cancelled,
        history_pruned = report.history_pruned,
        duration_ms = report.duration_ms,
        "sweep finished"
    );
    Ok(report)
}
