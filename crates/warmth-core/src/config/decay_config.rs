use serde::{Deserialize, Serialize};

use crate::relationship::DecayMode;

use super::defaults;

/// Decay subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Mode assigned to anchors created on first interaction.
    pub default_mode: DecayMode,
    /// Decay constant per mode, per day.
    pub lambda_per_day: LambdaTable,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            default_mode: defaults::DEFAULT_MODE,
            lambda_per_day: LambdaTable::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LambdaTable {
    pub slow: f64,
    pub medium: f64,
    pub fast: f64,
    pub test: f64,
}

impl LambdaTable {
    pub fn get(&self, mode: DecayMode) -> f64 {
        match mode {
            DecayMode::Slow => self.slow,
            DecayMode::Medium => self.medium,
            DecayMode::Fast => self.fast,
            DecayMode::Test => self.test,
        }
    }
}

impl Default for LambdaTable {
    fn default() -> Self {
        Self {
            slow: defaults::DEFAULT_LAMBDA_SLOW,
            medium: defaults::DEFAULT_LAMBDA_MEDIUM,
            fast: defaults::DEFAULT_LAMBDA_FAST,
            test: defaults::DEFAULT_LAMBDA_TEST,
        }
    }
}
