//! Mode change audit log.

use rusqlite::{params, Connection};

use warmth_core::models::ModeChange;
use warmth_core::{DecayMode, WarmthResult};

use super::{corrupt, format_ts, parse_ts};
use crate::to_storage_err;

pub fn insert(conn: &Connection, change: &ModeChange) -> WarmthResult<()> {
    conn.execute(
        "INSERT INTO warmth_mode_changes
            (entity_id, from_mode, to_mode, amplitude, score_before, score_after, changed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            change.entity_id,
            change.from_mode.as_str(),
            change.to_mode.as_str(),
            change.amplitude,
            change.score_before,
            change.score_after,
            format_ts(change.changed_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn for_entity(conn: &Connection, entity_id: &str) -> WarmthResult<Vec<ModeChange>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT from_mode, to_mode, amplitude, score_before, score_after, changed_at
             FROM warmth_mode_changes
             WHERE entity_id = ?1
             ORDER BY changed_at, id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (from, to, amplitude, score_before, score_after, changed_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(ModeChange {
            entity_id: entity_id.to_string(),
            from_mode: parse_mode(entity_id, &from)?,
            to_mode: parse_mode(entity_id, &to)?,
            amplitude,
            score_before,
            score_after,
            changed_at: parse_ts(entity_id, &changed_at)?,
        });
    }
    Ok(out)
}

fn parse_mode(entity_id: &str, value: &str) -> WarmthResult<DecayMode> {
    value
        .parse()
        .map_err(|_| corrupt(entity_id, format!("unknown mode {value:?}")))
}
