//! Score cache upsert, lookup, and history.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use warmth_core::models::ScoreCache;
use warmth_core::{Band, WarmthResult};

use super::{corrupt, format_ts, parse_ts};
use crate::to_storage_err;

/// Upsert the cache row and append a history snapshot in one transaction.
pub fn put_cache(conn: &Connection, entry: &ScoreCache) -> WarmthResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("put_cache begin: {e}")))?;
    let cached_at = format_ts(entry.cached_at);

    tx.execute(
        "INSERT INTO warmth_score_cache (entity_id, score, band, cached_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(entity_id) DO UPDATE SET
            score = excluded.score,
            band = excluded.band,
            cached_at = excluded.cached_at",
        params![entry.entity_id, entry.score, entry.band.as_str(), cached_at],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.execute(
        "INSERT INTO warmth_score_history (entity_id, score, band, cached_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![entry.entity_id, entry.score, entry.band.as_str(), cached_at],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("put_cache commit: {e}")))
}

pub fn get_cache(conn: &Connection, entity_id: &str) -> WarmthResult<Option<ScoreCache>> {
    let row = conn
        .query_row(
            "SELECT score, band, cached_at FROM warmth_score_cache WHERE entity_id = ?1",
            params![entity_id],
            |row| {
                Ok((
                    row.get::<_, u8>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    row.map(|(score, band, cached_at)| to_entry(entity_id, score, &band, &cached_at))
        .transpose()
}

pub fn history(
    conn: &Connection,
    entity_id: &str,
    since: DateTime<Utc>,
) -> WarmthResult<Vec<ScoreCache>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT score, band, cached_at FROM warmth_score_history
             WHERE entity_id = ?1 AND cached_at >= ?2
             ORDER BY cached_at, id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity_id, format_ts(since)], |row| {
            Ok((
                row.get::<_, u8>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (score, band, cached_at) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(to_entry(entity_id, score, &band, &cached_at)?);
    }
    Ok(out)
}

/// Delete history snapshots cached strictly before `before`. Returns the
/// number of rows removed.
pub fn prune_history(conn: &Connection, before: DateTime<Utc>) -> WarmthResult<usize> {
    conn.execute(
        "DELETE FROM warmth_score_history WHERE cached_at < ?1",
        params![format_ts(before)],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn clear_cache(conn: &Connection) -> WarmthResult<()> {
    conn.execute_batch(
        "DELETE FROM warmth_score_cache;
         DELETE FROM warmth_score_history;",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn to_entry(entity_id: &str, score: u8, band: &str, cached_at: &str) -> WarmthResult<ScoreCache> {
    let band: Band = band
        .parse()
        .map_err(|_| corrupt(entity_id, format!("unknown band {band:?}")))?;
    Ok(ScoreCache {
        entity_id: entity_id.to_string(),
        score,
        band,
        cached_at: parse_ts(entity_id, cached_at)?,
    })
}
