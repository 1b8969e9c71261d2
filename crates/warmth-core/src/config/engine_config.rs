use serde::{Deserialize, Serialize};

use super::defaults;

/// Write-path behavior for impulses and mode switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Total attempts (first try included) before surfacing a retryable error.
    pub max_write_attempts: u32,
    /// Backoff before the first retry after a store failure; doubles per retry.
    pub retry_backoff_ms: u64,
    /// Cap on a single backoff sleep.
    pub max_retry_backoff_ms: u64,
    /// Write the score cache right after a successful impulse.
    pub materialize_on_impulse: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: defaults::DEFAULT_MAX_WRITE_ATTEMPTS,
            retry_backoff_ms: defaults::DEFAULT_RETRY_BACKOFF_MS,
            max_retry_backoff_ms: defaults::DEFAULT_MAX_RETRY_BACKOFF_MS,
            materialize_on_impulse: defaults::DEFAULT_MATERIALIZE_ON_IMPULSE,
        }
    }
}
