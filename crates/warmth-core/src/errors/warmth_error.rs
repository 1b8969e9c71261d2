use chrono::{DateTime, Utc};

use super::StorageError;

/// Top-level error for every warmth engine operation.
#[derive(Debug, thiserror::Error)]
pub enum WarmthError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("concurrent write conflict on {entity_id} (expected version {expected_version:?})")]
    ConcurrencyConflict {
        entity_id: String,
        expected_version: Option<u64>,
    },

    #[error("write to {entity_id} still failing after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        entity_id: String,
        attempts: u32,
        last_error: String,
    },

    #[error("event for {entity_id} at {occurred_at} predates anchor at {anchor_at}")]
    OutOfOrderEvent {
        entity_id: String,
        occurred_at: DateTime<Utc>,
        anchor_at: DateTime<Utc>,
    },

    #[error("unknown decay mode: {name}")]
    UnknownMode { name: String },

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("a sweep is already running")]
    SweepInProgress,

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl WarmthError {
    /// Whether a caller may treat this failure as "score update pending" and
    /// retry later. Input and configuration errors never become valid by
    /// retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageError(_) | Self::ConcurrencyConflict { .. } | Self::RetriesExhausted { .. }
        )
    }
}

impl From<toml::de::Error> for WarmthError {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigError {
            reason: e.to_string(),
        }
    }
}

pub type WarmthResult<T> = Result<T, WarmthError>;
