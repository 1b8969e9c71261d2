use chrono::Utc;
use warmth_core::traits::IAnchorStore;
use warmth_core::{Anchor, DecayMode};
use warmth_storage::migrations::LATEST_VERSION;
use warmth_storage::StorageEngine;

#[test]
fn anchors_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("warmth.db");
    let at = Utc::now();

    {
        let engine = StorageEngine::open(&db_path).unwrap();
        engine
            .put_anchor(&Anchor::new("c-1", 42.0, at, DecayMode::Fast), None)
            .unwrap();
    }

    let engine = StorageEngine::open(&db_path).unwrap();
    let stored = engine.get_anchor("c-1").unwrap().unwrap();
    assert_eq!(stored.anchor.amplitude, 42.0);
    assert_eq!(stored.anchor.anchor_at, at);
    assert_eq!(stored.anchor.mode, DecayMode::Fast);
}

#[test]
fn migrations_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("warmth.db");
    {
        let engine = StorageEngine::open(&db_path).unwrap();
        assert_eq!(engine.schema_version().unwrap(), LATEST_VERSION);
    }
    let engine = StorageEngine::open(&db_path).unwrap();
    assert_eq!(engine.schema_version().unwrap(), LATEST_VERSION);
}

#[test]
fn file_backed_engine_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("wal.db")).unwrap();
    let wal = engine
        .pool()
        .writer
        .with_conn_sync(warmth_storage::pool::pragmas::verify_wal_mode)
        .unwrap();
    assert!(wal);
}
