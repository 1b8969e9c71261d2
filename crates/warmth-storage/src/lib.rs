//! # warmth-storage
//!
//! Anchor store implementations.
//! [`StorageEngine`] persists anchors, the score cache, score history and the
//! mode change log in SQLite (WAL, single writer, pooled readers).
//! [`InMemoryStore`] implements the same contracts over `DashMap` for tests
//! and embedded use.

pub mod engine;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;
pub use memory::InMemoryStore;

use warmth_core::errors::{StorageError, WarmthError};

/// Wrap a SQLite failure message as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> WarmthError {
    WarmthError::StorageError(StorageError::SqliteError {
        message: message.into(),
    })
}
