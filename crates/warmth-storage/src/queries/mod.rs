//! SQL for anchors, the score cache, and the mode change log.

pub mod anchor_ops;
pub mod cache_ops;
pub mod mode_change_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use warmth_core::errors::StorageError;
use warmth_core::WarmthError;

/// Fixed-width RFC 3339 with nanoseconds so that text ordering matches time
/// ordering and anchors round-trip exactly.
pub(crate) fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_ts(entity_id: &str, value: &str) -> Result<DateTime<Utc>, WarmthError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(entity_id, format!("bad timestamp {value:?}: {e}")))
}

pub(crate) fn corrupt(entity_id: &str, details: String) -> WarmthError {
    WarmthError::StorageError(StorageError::CorruptRow {
        entity_id: entity_id.to_string(),
        details,
    })
}
