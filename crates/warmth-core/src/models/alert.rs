use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relationship::Band;

/// Emitted when a relationship cools into the alert band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmthAlert {
    pub entity_id: String,
    pub previous_band: Band,
    pub band: Band,
    pub score: u8,
    pub at: DateTime<Utc>,
}
