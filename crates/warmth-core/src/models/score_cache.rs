use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relationship::Band;

use super::CurrentScore;

/// Read-optimized projection of an anchor. Disposable: it can be deleted
/// and rebuilt from anchors at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCache {
    pub entity_id: String,
    pub score: u8,
    pub band: Band,
    pub cached_at: DateTime<Utc>,
}

impl ScoreCache {
    pub fn from_current(entity_id: impl Into<String>, current: &CurrentScore, at: DateTime<Utc>) -> Self {
        Self {
            entity_id: entity_id.into(),
            score: current.score,
            band: current.band,
            cached_at: at,
        }
    }
}
