//! Span definitions per operation: read, impulse, mode switch, sweep, rebuild.

/// Create a score read span.
#[macro_export]
macro_rules! read_span {
    ($entity_id:expr) => {
        tracing::debug_span!("warmth.read", entity_id = %$entity_id)
    };
}

/// Create an impulse span.
#[macro_export]
macro_rules! impulse_span {
    ($entity_id:expr, $kind:expr) => {
        tracing::info_span!("warmth.impulse", entity_id = %$entity_id, kind = %$kind)
    };
}

/// Create a mode switch span.
#[macro_export]
macro_rules! mode_switch_span {
    ($entity_id:expr, $to_mode:expr) => {
        tracing::info_span!("warmth.mode_switch", entity_id = %$entity_id, to_mode = %$to_mode)
    };
}

/// Create a sweep span.
#[macro_export]
macro_rules! sweep_span {
    ($run_id:expr, $batch_size:expr, $concurrency:expr) => {
        tracing::info_span!(
            "warmth.sweep",
            run_id = %$run_id,
            batch_size = $batch_size,
            concurrency = $concurrency
        )
    };
}

/// Create a history rebuild span.
#[macro_export]
macro_rules! rebuild_span {
    ($entity_id:expr, $event_count:expr) => {
        tracing::info_span!("warmth.rebuild", entity_id = %$entity_id, events = $event_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const READ: &str = "warmth.read";
    pub const IMPULSE: &str = "warmth.impulse";
    pub const MODE_SWITCH: &str = "warmth.mode_switch";
    pub const SWEEP: &str = "warmth.sweep";
    pub const REBUILD: &str = "warmth.rebuild";
}
