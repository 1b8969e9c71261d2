//! # warmth-observability
//!
//! Tracing subscriber setup, span macros for every engine operation, and
//! lock-free operation counters.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use tracing_setup::{init_tracing, init_tracing_from_config};
