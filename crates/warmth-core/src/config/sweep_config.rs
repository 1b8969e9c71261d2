use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch Recomputer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Entities fetched per page.
    pub batch_size: usize,
    /// Worker threads used for the fan-out.
    pub concurrency: usize,
    /// Cadence for the external scheduler that calls `WarmthEngine::sweep`
    /// (seconds). The engine never schedules itself.
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::DEFAULT_SWEEP_BATCH_SIZE,
            concurrency: defaults::DEFAULT_SWEEP_CONCURRENCY,
            interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}
