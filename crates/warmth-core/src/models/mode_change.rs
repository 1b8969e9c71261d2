use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relationship::DecayMode;

/// Audit record of a decay-mode switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeChange {
    pub entity_id: String,
    pub from_mode: DecayMode,
    pub to_mode: DecayMode,
    /// Amplitude carried across the switch.
    pub amplitude: f64,
    pub score_before: u8,
    pub score_after: u8,
    pub changed_at: DateTime<Utc>,
}
