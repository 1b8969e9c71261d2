//! Mode Switcher: re-anchor under a new decay mode without a score jump.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use warmth_core::models::ModeChange;
use warmth_core::{Anchor, DecayMode, WarmthError, WarmthResult};
use warmth_decay::{evaluate, ModeRegistry};
use warmth_observability::mode_switch_span;

use crate::reader::{load_for_write, validate_entity_id};
use crate::retry::WriteContext;

/// Switch `entity_id` to `new_mode` at instant `at`.
///
/// The amplitude carried over is the old mode's decayed value at `at`, so
/// the score just before and just after the switch is the same. A switch to
/// the mode already in effect leaves the store alone; for an entity with no
/// anchor that means the default mode is returned unsaved.
pub fn switch_mode(
    ctx: &WriteContext<'_>,
    entity_id: &str,
    new_mode: DecayMode,
    at: DateTime<Utc>,
) -> WarmthResult<Anchor> {
    validate_entity_id(entity_id)?;
    let _span = mode_switch_span!(entity_id, new_mode).entered();

    let outcome = ctx.retry.run(entity_id, ctx.metrics, || {
        let (current, version) = load_for_write(ctx.anchors, ctx.registry, entity_id, at)?;
        if current.mode == new_mode {
            if at < current.anchor_at {
                return Err(out_of_order(&current, at));
            }
            return Ok((current, None));
        }
        let (next, change) = reanchor(ctx.registry, &current, new_mode, at)?;
        ctx.anchors.put_anchor(&next, version)?;
        Ok((next, Some(change)))
    })?;

    let (anchor, change) = outcome;
    if let Some(change) = change {
        ctx.metrics.record_mode_switch();
        debug!(
            entity_id,
            from = %change.from_mode,
            to = %change.to_mode,
            score = change.score_after,
            "decay mode switched"
        );
        // Anchor is already committed at this point.
        if let Err(err) = ctx.anchors.record_mode_change(&change) {
            warn!(entity_id, error = %err, "mode change not recorded");
        }
    }
    Ok(anchor)
}

/// New anchor and audit record for switching `current` to `new_mode` at `at`.
pub fn reanchor(
    registry: &ModeRegistry,
    current: &Anchor,
    new_mode: DecayMode,
    at: DateTime<Utc>,
) -> WarmthResult<(Anchor, ModeChange)> {
    if at < current.anchor_at {
        return Err(out_of_order(current, at));
    }
    let before = evaluate(registry, current, at);
    let next = Anchor::new(current.entity_id.clone(), before.amplitude_now, at, new_mode);
    let after = evaluate(registry, &next, at);

    let change = ModeChange {
        entity_id: current.entity_id.clone(),
        from_mode: current.mode,
        to_mode: new_mode,
        amplitude: next.amplitude,
        score_before: before.score,
        score_after: after.score,
        changed_at: at,
    };
    Ok((next, change))
}

fn out_of_order(current: &Anchor, at: DateTime<Utc>) -> WarmthError {
    WarmthError::OutOfOrderEvent {
        entity_id: current.entity_id.clone(),
        occurred_at: at,
        anchor_at: current.anchor_at,
    }
}
