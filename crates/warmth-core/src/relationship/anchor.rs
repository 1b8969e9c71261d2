use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::AMPLITUDE_MAX;

use super::DecayMode;

/// Minimal persisted state from which the score can be reconstructed at any
/// later instant. `amplitude` is exact as of `anchor_at`; decay past that
/// instant is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub entity_id: String,
    pub amplitude: f64,
    pub anchor_at: DateTime<Utc>,
    pub mode: DecayMode,
}

impl Anchor {
    /// Create an anchor, clamping amplitude to [0, 100]. Non-finite
    /// amplitude is stored as zero.
    pub fn new(
        entity_id: impl Into<String>,
        amplitude: f64,
        anchor_at: DateTime<Utc>,
        mode: DecayMode,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            amplitude: clamp_amplitude(amplitude),
            anchor_at,
            mode,
        }
    }

    /// Zero-amplitude anchor for an entity that has never been scored.
    pub fn zero(entity_id: impl Into<String>, mode: DecayMode, at: DateTime<Utc>) -> Self {
        Self::new(entity_id, 0.0, at, mode)
    }
}

/// An anchor together with the row version used for compare-and-swap.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedAnchor {
    pub anchor: Anchor,
    pub version: u64,
}

fn clamp_amplitude(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, AMPLITUDE_MAX)
    } else {
        0.0
    }
}
