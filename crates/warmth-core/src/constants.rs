/// Warmth engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resting score of a relationship with zero amplitude.
pub const SCORE_FLOOR: f64 = 30.0;

/// At or below this score a relationship needs a touch now.
pub const ATTENTION_THRESHOLD: f64 = SCORE_FLOOR;

/// Upper bound of the displayed score.
pub const SCORE_MAX: f64 = 100.0;

/// Hard ceiling on stored amplitude, independent of the score floor.
pub const AMPLITUDE_MAX: f64 = 100.0;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Maximum page size accepted by entity pagination.
pub const MAX_PAGE_SIZE: usize = 10_000;
