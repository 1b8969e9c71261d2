//! Bounded retry for anchor writes.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use warmth_core::config::EngineConfig;
use warmth_core::traits::IAnchorStore;
use warmth_core::{WarmthError, WarmthResult};
use warmth_decay::ModeRegistry;
use warmth_observability::EngineMetrics;

/// How many times a write is attempted and how long to wait between
/// attempts that failed on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
            max_backoff,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.max_write_attempts,
            Duration::from_millis(config.retry_backoff_ms),
            Duration::from_millis(config.max_retry_backoff_ms),
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sleep before retry number `attempt` (1-based): doubles each time, capped.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_backoff.saturating_mul(factor).min(self.max_backoff)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent.
    ///
    /// Version conflicts are retried immediately since `op` re-reads the
    /// anchor. Store failures are retried after a backoff.
    pub fn run<T, F>(&self, entity_id: &str, metrics: &EngineMetrics, mut op: F) -> WarmthResult<T>
    where
        F: FnMut() -> WarmthResult<T>,
    {
        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            match op() {
                Ok(value) => return Ok(value),
                Err(err @ WarmthError::ConcurrencyConflict { .. }) => {
                    metrics.record_conflict();
                    debug!(entity_id, attempt, "anchor version moved, re-reading");
                    last_error = err.to_string();
                }
                Err(err @ WarmthError::StorageError(_)) => {
                    warn!(entity_id, attempt, error = %err, "anchor write failed");
                    last_error = err.to_string();
                    if attempt < self.max_attempts {
                        thread::sleep(self.backoff(attempt));
                    }
                }
                Err(err) => return Err(err),
            }
        }

        metrics.record_retries_exhausted();
        Err(WarmthError::RetriesExhausted {
            entity_id: entity_id.to_string(),
            attempts: self.max_attempts,
            last_error,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Everything a write path needs, borrowed from the engine for one call.
#[derive(Clone, Copy)]
pub struct WriteContext<'a> {
    pub anchors: &'a dyn IAnchorStore,
    pub registry: &'a ModeRegistry,
    pub retry: &'a RetryPolicy,
    pub metrics: &'a EngineMetrics,
}
