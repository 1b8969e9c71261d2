//! Warmth alerts: notice when a relationship cools into the alert band.

use warmth_core::config::AlertConfig;
use warmth_core::models::{ScoreCache, WarmthAlert};
use warmth_core::Band;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
    pub alert_band: Band,
}

impl AlertPolicy {
    pub fn new(alert_band: Band) -> Self {
        Self { alert_band }
    }

    pub fn from_config(config: &AlertConfig) -> Self {
        Self::new(config.alert_band)
    }

    /// Alert when the band crosses from above `alert_band` to at-or-below
    /// it. Edge-triggered: staying in the band, or having no previous
    /// cache entry, raises nothing.
    pub fn evaluate(&self, previous: Option<&ScoreCache>, current: &ScoreCache) -> Option<WarmthAlert> {
        let previous = previous?;
        if previous.band > self.alert_band && current.band <= self.alert_band {
            return Some(WarmthAlert {
                entity_id: current.entity_id.clone(),
                previous_band: previous.band,
                band: current.band,
                score: current.score,
                at: current.cached_at,
            });
        }
        None
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::from_config(&AlertConfig::default())
    }
}
