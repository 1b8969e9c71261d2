//! Full-history rebuild. Backfilled events cannot be patched into an anchor
//! that has already decayed past them, so the anchor is recomputed from zero
//! by replaying every known event in timestamp order.

use chrono::{DateTime, Utc};

use warmth_core::constants::AMPLITUDE_MAX;
use warmth_core::time::days_between;
use warmth_core::{Anchor, DecayMode, Interaction};

use crate::formula::decay;
use crate::impulse::ImpulseTable;
use crate::registry::ModeRegistry;

/// Amplitude and anchor instant after folding `events` under `mode`.
/// Returns `None` for an empty history.
pub fn replay(
    registry: &ModeRegistry,
    impulses: &ImpulseTable,
    mode: DecayMode,
    events: &[Interaction],
) -> Option<(f64, DateTime<Utc>)> {
    let mut ordered: Vec<&Interaction> = events.iter().collect();
    // Stable sort keeps delivery order for identical timestamps.
    ordered.sort_by_key(|e| e.occurred_at);

    let first = ordered.first()?;
    let mut amplitude = 0.0;
    let mut anchor_at = first.occurred_at;
    for event in ordered {
        let elapsed = days_between(anchor_at, event.occurred_at);
        let decayed = decay(registry, amplitude, elapsed, mode);
        amplitude = (decayed + impulses.weight(event.kind)).min(AMPLITUDE_MAX);
        anchor_at = event.occurred_at;
    }
    Some((amplitude, anchor_at))
}

/// Rebuilt anchor for `entity_id`, or `None` for an empty history.
pub fn rebuild_anchor(
    registry: &ModeRegistry,
    impulses: &ImpulseTable,
    entity_id: &str,
    mode: DecayMode,
    events: &[Interaction],
) -> Option<Anchor> {
    replay(registry, impulses, mode, events)
        .map(|(amplitude, at)| Anchor::new(entity_id, amplitude, at, mode))
}
