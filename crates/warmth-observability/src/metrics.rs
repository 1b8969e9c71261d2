//! Operation counters shared across engine threads.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct EngineMetrics {
    reads: AtomicU64,
    impulses_applied: AtomicU64,
    mode_switches: AtomicU64,
    write_conflicts: AtomicU64,
    write_retries_exhausted: AtomicU64,
    sweeps_completed: AtomicU64,
    sweeps_cancelled: AtomicU64,
    entities_refreshed: AtomicU64,
    entities_failed: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub reads: u64,
    pub impulses_applied: u64,
    pub mode_switches: u64,
    pub write_conflicts: u64,
    pub write_retries_exhausted: u64,
    pub sweeps_completed: u64,
    pub sweeps_cancelled: u64,
    pub entities_refreshed: u64,
    pub entities_failed: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_impulse(&self) {
        self.impulses_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mode_switch(&self) {
        self.mode_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_conflict(&self) {
        self.write_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retries_exhausted(&self) {
        self.write_retries_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sweep(&self, refreshed: usize, failed: usize, cancelled: bool) {
        self.entities_refreshed
            .fetch_add(refreshed as u64, Ordering::Relaxed);
        self.entities_failed.fetch_add(failed as u64, Ordering::Relaxed);
        if cancelled {
            self.sweeps_cancelled.fetch_add(1, Ordering::Relaxed);
        } else {
            self.sweeps_completed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            impulses_applied: self.impulses_applied.load(Ordering::Relaxed),
            mode_switches: self.mode_switches.load(Ordering::Relaxed),
            write_conflicts: self.write_conflicts.load(Ordering::Relaxed),
            write_retries_exhausted: self.write_retries_exhausted.load(Ordering::Relaxed),
            sweeps_completed: self.sweeps_completed.load(Ordering::Relaxed),
            sweeps_cancelled: self.sweeps_cancelled.load(Ordering::Relaxed),
            entities_refreshed: self.entities_refreshed.load(Ordering::Relaxed),
            entities_failed: self.entities_failed.load(Ordering::Relaxed),
        }
    }
}
