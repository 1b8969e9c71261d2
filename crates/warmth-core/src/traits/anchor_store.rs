use crate::errors::WarmthResult;
use crate::models::ModeChange;
use crate::relationship::{Anchor, VersionedAnchor};

/// Per-relationship anchor persistence with optimistic concurrency.
///
/// Implementations must make `put_anchor` an atomic compare-and-swap on the
/// row version so that concurrent impulses for one entity serialize.
pub trait IAnchorStore: Send + Sync {
    /// `Ok(None)` when the entity has never been anchored.
    fn get_anchor(&self, entity_id: &str) -> WarmthResult<Option<VersionedAnchor>>;

    /// Write `anchor` if the stored version still equals `expected_version`
    /// (`None` = the row must not exist yet). Returns the new version, or
    /// `WarmthError::ConcurrencyConflict` when another writer got there first.
    fn put_anchor(&self, anchor: &Anchor, expected_version: Option<u64>) -> WarmthResult<u64>;

    /// Anchored entity ids in ascending order, strictly after `after`.
    fn list_entities(&self, after: Option<&str>, limit: usize) -> WarmthResult<Vec<String>>;

    /// Number of anchored entities.
    fn count_anchors(&self) -> WarmthResult<usize>;

    /// Append a mode switch to the audit log.
    fn record_mode_change(&self, change: &ModeChange) -> WarmthResult<()>;

    /// Mode switches for an entity, oldest first.
    fn mode_changes(&self, entity_id: &str) -> WarmthResult<Vec<ModeChange>>;
}
