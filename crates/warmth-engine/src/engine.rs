//! WarmthEngine: the public surface. Owns the immutable configuration, the
//! stores, the single-sweep guard and the cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use warmth_core::config::{EngineConfig, SweepConfig};
use warmth_core::models::{CurrentScore, HistoryWindow, ModeChange, ScoreCache, SweepReport};
use warmth_core::time::parse_timestamp;
use warmth_core::traits::{IAnchorStore, IScoreCacheStore};
use warmth_core::{
    Anchor, DecayMode, Interaction, InteractionKind, WarmthConfig, WarmthError, WarmthResult,
};
use warmth_decay::{evaluate, ImpulseTable, ModeRegistry};
use warmth_observability::{read_span, rebuild_span, EngineMetrics, MetricsSnapshot};

use crate::alerts::AlertPolicy;
use crate::recompute::{self, SweepOptions};
use crate::retry::{RetryPolicy, WriteContext};
use crate::{applier, reader, switcher};

/// Requests cancellation of the sweep currently running on an engine.
#[derive(Debug, Clone)]
pub struct SweepCancel(Arc<AtomicBool>);

impl SweepCancel {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct WarmthEngine {
    anchors: Arc<dyn IAnchorStore>,
    cache: Arc<dyn IScoreCacheStore>,
    registry: ModeRegistry,
    impulses: ImpulseTable,
    retry: RetryPolicy,
    engine_config: EngineConfig,
    sweep_config: SweepConfig,
    alerts: AlertPolicy,
    metrics: Arc<EngineMetrics>,
    /// Guard: only one sweep can run at a time.
    is_running: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
}

impl WarmthEngine {
    /// Build an engine over separate anchor and cache stores.
    pub fn new(
        anchors: Arc<dyn IAnchorStore>,
        cache: Arc<dyn IScoreCacheStore>,
        config: &WarmthConfig,
    ) -> WarmthResult<Self> {
        config.validate()?;
        Ok(Self {
            anchors,
            cache,
            registry: ModeRegistry::from_config(&config.decay)?,
            impulses: ImpulseTable::from_config(&config.impulse)?,
            retry: RetryPolicy::from_config(&config.engine),
            engine_config: config.engine.clone(),
            sweep_config: config.sweep.clone(),
            alerts: AlertPolicy::from_config(&config.alerts),
            metrics: Arc::new(EngineMetrics::new()),
            is_running: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Build an engine over one store that holds both anchors and cache.
    pub fn with_store<S>(store: Arc<S>, config: &WarmthConfig) -> WarmthResult<Self>
    where
        S: IAnchorStore + IScoreCacheStore + 'static,
    {
        let anchors: Arc<dyn IAnchorStore> = store.clone();
        let cache: Arc<dyn IScoreCacheStore> = store;
        Self::new(anchors, cache, config)
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn impulses(&self) -> &ImpulseTable {
        &self.impulses
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Cadence an external scheduler should call [`sweep`](Self::sweep) at.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_config.interval_secs)
    }

    pub fn is_sweep_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Handle for cancelling the running sweep from another thread.
    pub fn cancel_handle(&self) -> SweepCancel {
        SweepCancel(Arc::clone(&self.cancel))
    }

    // ── Read path ──────────────────────────────────────────────────────

    pub fn current_score(&self, entity_id: &str) -> WarmthResult<CurrentScore> {
        self.current_score_at(entity_id, Utc::now())
    }

    pub fn current_score_at(&self, entity_id: &str, now: DateTime<Utc>) -> WarmthResult<CurrentScore> {
        let _span = read_span!(entity_id).entered();
        self.metrics.record_read();
        reader::current_score(self.anchors.as_ref(), &self.registry, entity_id, now)
    }

    /// Whole days until the entity's score decays to the attention
    /// threshold under its current mode. Zero means it needs a touch now.
    pub fn days_until_attention(&self, entity_id: &str, now: DateTime<Utc>) -> WarmthResult<u32> {
        reader::validate_entity_id(entity_id)?;
        let anchor = match self.anchors.get_anchor(entity_id)? {
            Some(stored) => stored.anchor,
            None => Anchor::zero(entity_id, self.registry.default_mode(), now),
        };
        let current = evaluate(&self.registry, &anchor, now);
        Ok(self.registry.days_until_attention(current.score, anchor.mode))
    }

    // ── Write paths ────────────────────────────────────────────────────

    /// Fold an interaction into the entity's anchor, then materialize the
    /// cache if configured to.
    pub fn apply_impulse(
        &self,
        entity_id: &str,
        kind: InteractionKind,
        occurred_at: DateTime<Utc>,
    ) -> WarmthResult<Anchor> {
        let anchor = applier::apply_impulse(&self.write_context(), &self.impulses, entity_id, kind, occurred_at)?;
        if self.engine_config.materialize_on_impulse {
            self.materialize(&anchor);
        }
        Ok(anchor)
    }

    /// Same as [`apply_impulse`](Self::apply_impulse) for untyped input: an
    /// unknown kind counts as `other`, the timestamp must be RFC 3339.
    pub fn apply_raw_impulse(&self, entity_id: &str, kind: &str, occurred_at: &str) -> WarmthResult<Anchor> {
        let occurred_at = parse_timestamp(occurred_at)?;
        self.apply_impulse(entity_id, InteractionKind::parse(kind), occurred_at)
    }

    pub fn switch_mode(&self, entity_id: &str, new_mode: DecayMode) -> WarmthResult<Anchor> {
        self.switch_mode_at(entity_id, new_mode, Utc::now())
    }

    pub fn switch_mode_at(
        &self,
        entity_id: &str,
        new_mode: DecayMode,
        at: DateTime<Utc>,
    ) -> WarmthResult<Anchor> {
        switcher::switch_mode(&self.write_context(), entity_id, new_mode, at)
    }

    /// Recompute the anchor from a full interaction history under the
    /// entity's current mode. Returns `None` (and writes nothing) for an
    /// empty history.
    pub fn rebuild_anchor(&self, entity_id: &str, events: &[Interaction]) -> WarmthResult<Option<Anchor>> {
        reader::validate_entity_id(entity_id)?;
        let _span = rebuild_span!(entity_id, events.len()).entered();
        if events.is_empty() {
            return Ok(None);
        }

        let rebuilt = self.retry.run(entity_id, self.metrics.as_ref(), || {
            let stored = self.anchors.get_anchor(entity_id)?;
            let (mode, version) = match &stored {
                Some(v) => (v.anchor.mode, Some(v.version)),
                None => (self.registry.default_mode(), None),
            };
            let anchor = match warmth_decay::replay::rebuild_anchor(
                &self.registry,
                &self.impulses,
                entity_id,
                mode,
                events,
            ) {
                Some(anchor) => anchor,
                None => return Ok(None),
            };
            self.anchors.put_anchor(&anchor, version)?;
            Ok(Some(anchor))
        })?;

        if let Some(anchor) = &rebuilt {
            debug!(entity_id, amplitude = anchor.amplitude, "anchor rebuilt from history");
            if self.engine_config.materialize_on_impulse {
                self.materialize(anchor);
            }
        }
        Ok(rebuilt)
    }

    // ── Cache ──────────────────────────────────────────────────────────

    /// Recompute and store one entity's cache row at `now`.
    pub fn refresh_entity(&self, entity_id: &str, now: DateTime<Utc>) -> WarmthResult<ScoreCache> {
        recompute::refresh_entity(
            self.anchors.as_ref(),
            self.cache.as_ref(),
            &self.registry,
            entity_id,
            now,
        )
        .map(|r| r.entry)
    }

    /// Sweep with the configured batch size and concurrency.
    pub fn sweep(&self) -> WarmthResult<SweepReport> {
        self.sweep_with(
            SweepOptions {
                batch_size: self.sweep_config.batch_size,
                concurrency: self.sweep_config.concurrency,
            },
            Utc::now(),
        )
    }

    /// Sweep with explicit options, scoring every entity at `now`.
    /// Returns `SweepInProgress` if another sweep holds the guard.
    pub fn sweep_with(&self, options: SweepOptions, now: DateTime<Utc>) -> WarmthResult<SweepReport> {
        // Acquire the single-execution guard.
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(WarmthError::SweepInProgress);
        }
        self.cancel.store(false, Ordering::SeqCst);

        let result = recompute::sweep(
            self.anchors.as_ref(),
            self.cache.as_ref(),
            &self.registry,
            &self.alerts,
            options,
            &self.cancel,
            now,
        );

        // Release the guard.
        self.is_running.store(false, Ordering::SeqCst);

        let report = result?;
        self.metrics
            .record_sweep(report.processed, report.failed, report.cancelled);
        Ok(report)
    }

    // ── Audit & history ────────────────────────────────────────────────

    pub fn mode_changes(&self, entity_id: &str) -> WarmthResult<Vec<ModeChange>> {
        reader::validate_entity_id(entity_id)?;
        self.anchors.mode_changes(entity_id)
    }

    /// Cached score snapshots within `window` before `now`, oldest first.
    pub fn score_history(
        &self,
        entity_id: &str,
        window: HistoryWindow,
        now: DateTime<Utc>,
    ) -> WarmthResult<Vec<ScoreCache>> {
        reader::validate_entity_id(entity_id)?;
        self.cache.history(entity_id, now - window.duration())
    }

    fn write_context(&self) -> WriteContext<'_> {
        WriteContext {
            anchors: self.anchors.as_ref(),
            registry: &self.registry,
            retry: &self.retry,
            metrics: self.metrics.as_ref(),
        }
    }

    /// Write the cache row as of the anchor instant, unless a newer row
    /// (e.g. from a sweep) is already there.
    fn materialize(&self, anchor: &Anchor) {
        match self.cache.get_cache(&anchor.entity_id) {
            Ok(Some(existing)) if existing.cached_at > anchor.anchor_at => {
                debug!(entity_id = %anchor.entity_id, "newer cache row kept");
                return;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(entity_id = %anchor.entity_id, error = %err, "score cache not materialized");
                return;
            }
        }
        let current = evaluate(&self.registry, anchor, anchor.anchor_at);
        let entry = ScoreCache::from_current(anchor.entity_id.clone(), &current, anchor.anchor_at);
        if let Err(err) = self.cache.put_cache(&entry) {
            warn!(entity_id = %anchor.entity_id, error = %err, "score cache not materialized");
        }
    }
}
