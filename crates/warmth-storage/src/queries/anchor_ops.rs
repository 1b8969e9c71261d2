//! Get, compare-and-swap put, and keyset listing for anchors.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use warmth_core::constants::MAX_PAGE_SIZE;
use warmth_core::{Anchor, DecayMode, VersionedAnchor, WarmthError, WarmthResult};

use super::{corrupt, format_ts, parse_ts};
use crate::to_storage_err;

pub fn get_anchor(conn: &Connection, entity_id: &str) -> WarmthResult<Option<VersionedAnchor>> {
    let row = conn
        .query_row(
            "SELECT amplitude, anchor_at, mode, version FROM warmth_anchors WHERE entity_id = ?1",
            params![entity_id],
            |row| {
                Ok((
                    row.get::<_, f64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((amplitude, anchor_at, mode, version)) = row else {
        return Ok(None);
    };
    let mode: DecayMode = mode
        .parse()
        .map_err(|_| corrupt(entity_id, format!("unknown mode {mode:?}")))?;
    let version =
        u64::try_from(version).map_err(|_| corrupt(entity_id, format!("negative version {version}")))?;
    Ok(Some(VersionedAnchor {
        anchor: Anchor {
            entity_id: entity_id.to_string(),
            amplitude,
            anchor_at: parse_ts(entity_id, &anchor_at)?,
            mode,
        },
        version,
    }))
}

/// Insert (`expected_version = None`) or update-if-version-matches.
/// Zero affected rows means another writer won the race.
pub fn put_anchor(
    conn: &Connection,
    anchor: &Anchor,
    expected_version: Option<u64>,
) -> WarmthResult<u64> {
    let now = format_ts(Utc::now());
    let anchor_at = format_ts(anchor.anchor_at);

    let (changed, next_version) = match expected_version {
        None => {
            let changed = conn
                .execute(
                    "INSERT INTO warmth_anchors (entity_id, amplitude, anchor_at, mode, version, updated_at)
                     VALUES (?1, ?2, ?3, ?4, 1, ?5)
                     ON CONFLICT(entity_id) DO NOTHING",
                    params![anchor.entity_id, anchor.amplitude, anchor_at, anchor.mode.as_str(), now],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
            (changed, 1)
        }
        Some(expected) => {
            let expected_i64 = i64::try_from(expected).map_err(|_| WarmthError::InvalidInput {
                reason: format!("version {expected} out of range"),
            })?;
            let changed = conn
                .execute(
                    "UPDATE warmth_anchors
                     SET amplitude = ?2, anchor_at = ?3, mode = ?4, version = version + 1, updated_at = ?5
                     WHERE entity_id = ?1 AND version = ?6",
                    params![
                        anchor.entity_id,
                        anchor.amplitude,
                        anchor_at,
                        anchor.mode.as_str(),
                        now,
                        expected_i64
                    ],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
            (changed, expected + 1)
        }
    };

    if changed == 0 {
        return Err(WarmthError::ConcurrencyConflict {
            entity_id: anchor.entity_id.clone(),
            expected_version,
        });
    }
    Ok(next_version)
}

pub fn list_entities(conn: &Connection, after: Option<&str>, limit: usize) -> WarmthResult<Vec<String>> {
    let limit = limit.min(MAX_PAGE_SIZE) as i64;
    let mut stmt = conn
        .prepare_cached(
            "SELECT entity_id FROM warmth_anchors
             WHERE (?1 IS NULL OR entity_id > ?1)
             ORDER BY entity_id
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![after, limit], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_anchors(conn: &Connection) -> WarmthResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM warmth_anchors", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as usize)
}
