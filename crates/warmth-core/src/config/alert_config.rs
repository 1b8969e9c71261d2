use serde::{Deserialize, Serialize};

use crate::relationship::Band;

use super::defaults;

/// Warmth alert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// An alert fires when a relationship drops into this band or below.
    pub alert_band: Band,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            alert_band: defaults::DEFAULT_ALERT_BAND,
        }
    }
}
