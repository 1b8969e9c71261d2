//! Score Reader: the read path. Never writes, never retries.

use chrono::{DateTime, Utc};

use warmth_core::models::CurrentScore;
use warmth_core::traits::IAnchorStore;
use warmth_core::{Anchor, WarmthError, WarmthResult};
use warmth_decay::{evaluate, ModeRegistry};

/// Current score for `entity_id` at `now`.
///
/// An entity with no anchor scores as a zero-amplitude anchor in the
/// default mode. That default is not persisted.
pub fn current_score(
    anchors: &dyn IAnchorStore,
    registry: &ModeRegistry,
    entity_id: &str,
    now: DateTime<Utc>,
) -> WarmthResult<CurrentScore> {
    validate_entity_id(entity_id)?;
    let anchor = match anchors.get_anchor(entity_id)? {
        Some(stored) => stored.anchor,
        None => Anchor::zero(entity_id, registry.default_mode(), now),
    };
    Ok(evaluate(registry, &anchor, now))
}

/// Stored anchor and its version, or an unsaved default anchored at `at`.
pub(crate) fn load_for_write(
    anchors: &dyn IAnchorStore,
    registry: &ModeRegistry,
    entity_id: &str,
    at: DateTime<Utc>,
) -> WarmthResult<(Anchor, Option<u64>)> {
    Ok(match anchors.get_anchor(entity_id)? {
        Some(stored) => (stored.anchor, Some(stored.version)),
        None => (Anchor::zero(entity_id, registry.default_mode(), at), None),
    })
}

pub(crate) fn validate_entity_id(entity_id: &str) -> WarmthResult<()> {
    if entity_id.trim().is_empty() {
        return Err(WarmthError::InvalidInput {
            reason: "entity id must not be empty".to_string(),
        });
    }
    Ok(())
}
