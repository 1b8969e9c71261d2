// Single source of truth for all default values.

use crate::relationship::{Band, DecayMode};

// --- Decay ---
pub const DEFAULT_MODE: DecayMode = DecayMode::Medium;
pub const DEFAULT_LAMBDA_SLOW: f64 = 0.040132; // half-life ~17.3 days
pub const DEFAULT_LAMBDA_MEDIUM: f64 = 0.085998; // half-life ~8.1 days
pub const DEFAULT_LAMBDA_FAST: f64 = 0.171996; // half-life ~4.0 days
pub const DEFAULT_LAMBDA_TEST: f64 = 2.407946; // half-life ~7 hours

// --- Impulses ---
pub const DEFAULT_WEIGHT_MEETING: f64 = 9.0;
pub const DEFAULT_WEIGHT_CALL: f64 = 7.0;
pub const DEFAULT_WEIGHT_DM: f64 = 4.0;
pub const DEFAULT_WEIGHT_SMS: f64 = 4.0;
pub const DEFAULT_WEIGHT_EMAIL: f64 = 5.0;
pub const DEFAULT_WEIGHT_NOTE: f64 = 3.0;
pub const DEFAULT_WEIGHT_OTHER: f64 = 5.0;

// --- Engine ---
pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 4;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 20;
pub const DEFAULT_MAX_RETRY_BACKOFF_MS: u64 = 500;
pub const DEFAULT_MATERIALIZE_ON_IMPULSE: bool = true;

// --- Sweep ---
pub const DEFAULT_SWEEP_BATCH_SIZE: usize = 500;
pub const DEFAULT_SWEEP_CONCURRENCY: usize = 4;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400; // daily

// --- Alerts ---
pub const DEFAULT_ALERT_BAND: Band = Band::Cool;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "warmth.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
