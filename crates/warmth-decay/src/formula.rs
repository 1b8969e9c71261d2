use chrono::{DateTime, Utc};

use warmth_core::constants::{SCORE_FLOOR, SCORE_MAX};
use warmth_core::models::CurrentScore;
use warmth_core::time::days_between;
use warmth_core::{Anchor, Band, DecayMode};

use crate::registry::ModeRegistry;

/// Decayed amplitude after `elapsed_days` under `mode`.
///
/// ```text
/// amplitudeNow = amplitude × e^(−λ(mode) × max(0, elapsedDays))
/// ```
///
/// Negative or non-finite elapsed time means no decay. Non-finite or
/// negative amplitude is treated as zero. Underflow yields exactly 0.0.
pub fn decay(registry: &ModeRegistry, amplitude: f64, elapsed_days: f64, mode: DecayMode) -> f64 {
    let amplitude = if amplitude.is_finite() { amplitude.max(0.0) } else { 0.0 };
    let elapsed = if elapsed_days.is_finite() { elapsed_days.max(0.0) } else { 0.0 };
    if amplitude == 0.0 || elapsed == 0.0 {
        return amplitude;
    }
    amplitude * (-registry.lambda(mode) * elapsed).exp()
}

/// Displayed score: `round(clamp(30 + amplitudeNow, 0, 100))`.
pub fn score(amplitude_now: f64) -> u8 {
    let raw = SCORE_FLOOR + amplitude_now;
    if raw.is_nan() {
        return SCORE_FLOOR as u8;
    }
    raw.clamp(0.0, SCORE_MAX).round() as u8
}

pub fn band(score: u8) -> Band {
    Band::from_score(score)
}

/// Score an anchor at instant `at`. `at` earlier than the anchor is
/// evaluated at the anchor itself.
pub fn evaluate(registry: &ModeRegistry, anchor: &Anchor, at: DateTime<Utc>) -> CurrentScore {
    let elapsed = days_between(anchor.anchor_at, at);
    let amplitude_now = decay(registry, anchor.amplitude, elapsed, anchor.mode);
    let score = score(amplitude_now);
    CurrentScore {
        score,
        band: band(score),
        amplitude_now,
    }
}
