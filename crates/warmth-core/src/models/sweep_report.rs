use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WarmthAlert;

/// Outcome of one Batch Recomputer run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepReport {
    pub run_id: String,
    /// Entities whose cache was written.
    pub processed: usize,
    /// Entities whose read or cache write failed; retried next run.
    pub failed: usize,
    /// Entities left stale because the sweep was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
    /// History snapshots deleted for falling outside the longest window.
    pub history_pruned: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub duration_ms: u64,
    pub alerts: Vec<WarmthAlert>,
}

impl SweepReport {
    pub fn total_seen(&self) -> usize {
        self.processed + self.failed + self.skipped
    }
}
