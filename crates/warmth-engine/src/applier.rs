//! Impulse Applier: decay the anchor to the interaction instant, add the
//! impulse, re-anchor.

use chrono::{DateTime, Utc};
use tracing::debug;

use warmth_core::constants::AMPLITUDE_MAX;
use warmth_core::time::days_between;
use warmth_core::{Anchor, InteractionKind, WarmthError, WarmthResult};
use warmth_decay::{decay, ImpulseTable, ModeRegistry};
use warmth_observability::impulse_span;

use crate::reader::{load_for_write, validate_entity_id};
use crate::retry::WriteContext;

/// Apply one interaction and persist the new anchor.
///
/// Concurrent impulses for the same entity serialize through the store's
/// compare-and-swap; a lost race re-reads and re-applies.
pub fn apply_impulse(
    ctx: &WriteContext<'_>,
    impulses: &ImpulseTable,
    entity_id: &str,
    kind: InteractionKind,
    occurred_at: DateTime<Utc>,
) -> WarmthResult<Anchor> {
    validate_entity_id(entity_id)?;
    let _span = impulse_span!(entity_id, kind).entered();
    let weight = impulses.weight(kind);

    let anchor = ctx.retry.run(entity_id, ctx.metrics, || {
        let (current, version) = load_for_write(ctx.anchors, ctx.registry, entity_id, occurred_at)?;
        let next = next_anchor(ctx.registry, &current, weight, occurred_at)?;
        ctx.anchors.put_anchor(&next, version)?;
        Ok(next)
    })?;

    ctx.metrics.record_impulse();
    debug!(
        entity_id,
        amplitude = anchor.amplitude,
        mode = %anchor.mode,
        "impulse applied"
    );
    Ok(anchor)
}

/// The anchor that results from adding `weight` at `occurred_at`.
///
/// Mode is unchanged. Events older than the anchor cannot be folded in
/// incrementally and are rejected.
pub fn next_anchor(
    registry: &ModeRegistry,
    current: &Anchor,
    weight: f64,
    occurred_at: DateTime<Utc>,
) -> WarmthResult<Anchor> {
    if occurred_at < current.anchor_at {
        return Err(WarmthError::OutOfOrderEvent {
            entity_id: current.entity_id.clone(),
            occurred_at,
            anchor_at: current.anchor_at,
        });
    }
    let elapsed = days_between(current.anchor_at, occurred_at);
    let decayed = decay(registry, current.amplitude, elapsed, current.mode);
    let amplitude = (decayed + weight).min(AMPLITUDE_MAX);
    Ok(Anchor::new(
        current.entity_id.clone(),
        amplitude,
        occurred_at,
        current.mode,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use warmth_core::DecayMode;

    #[test]
    fn meeting_on_empty_anchor_lands_at_nine() {
        let r = ModeRegistry::default();
        let t0 = Utc::now();
        let next = next_anchor(&r, &Anchor::zero("a", DecayMode::Medium, t0), 9.0, t0).unwrap();
        assert_eq!(next.amplitude, 9.0);
        assert_eq!(next.anchor_at, t0);
    }

    #[test]
    fn decays_before_adding() {
        let r = ModeRegistry::default();
        let t0 = Utc::now();
        let current = Anchor::new("a", 50.0, t0, DecayMode::Medium);
        let half_life = r.half_life_days(DecayMode::Medium);
        let at = t0 + Duration::milliseconds((half_life * 86_400_000.0) as i64);
        let next = next_anchor(&r, &current, 5.0, at).unwrap();
        assert!((next.amplitude - 30.0).abs() < 1e-3);
    }

    #[test]
    fn amplitude_is_capped() {
        let r = ModeRegistry::default();
        let t0 = Utc::now();
        let next = next_anchor(&r, &Anchor::new("a", 98.0, t0, DecayMode::Slow), 9.0, t0).unwrap();
        assert_eq!(next.amplitude, 100.0);
    }

    #[test]
    fn older_event_is_rejected() {
        let r = ModeRegistry::default();
        let t0 = Utc::now();
        let err = next_anchor(
            &r,
            &Anchor::new("a", 10.0, t0, DecayMode::Fast),
            4.0,
            t0 - Duration::seconds(1),
        )
        .unwrap_err();
        assert!(matches!(err, WarmthError::OutOfOrderEvent { .. }));
        assert!(!err.is_retryable());
    }
}
