//! Configuration loaded once per process from TOML. Every section and field
//! has a default, so an empty document is a valid configuration.

mod alert_config;
mod decay_config;
pub mod defaults;
mod engine_config;
mod impulse_config;
mod observability_config;
mod storage_config;
mod sweep_config;

pub use alert_config::AlertConfig;
pub use decay_config::{DecayConfig, LambdaTable};
pub use engine_config::EngineConfig;
pub use impulse_config::ImpulseConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use sweep_config::SweepConfig;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_PAGE_SIZE;
use crate::errors::{WarmthError, WarmthResult};
use crate::relationship::{DecayMode, InteractionKind};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WarmthConfig {
    pub decay: DecayConfig,
    pub impulse: ImpulseConfig,
    pub engine: EngineConfig,
    pub sweep: SweepConfig,
    pub alerts: AlertConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl WarmthConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(input: &str) -> WarmthResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the decay model or the write paths.
    pub fn validate(&self) -> WarmthResult<()> {
        for mode in DecayMode::ALL {
            let lambda = self.decay.lambda_per_day.get(mode);
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(config_err(format!(
                    "decay.lambda_per_day.{mode} must be a positive finite number, got {lambda}"
                )));
            }
        }

        for (name, weight) in &self.impulse.weights {
            let known = InteractionKind::ALL.iter().any(|k| k.as_str() == name);
            if !known {
                return Err(config_err(format!("impulse.weights has unknown kind {name:?}")));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(config_err(format!(
                    "impulse.weights.{name} must be a non-negative finite number, got {weight}"
                )));
            }
        }

        if self.engine.max_write_attempts == 0 {
            return Err(config_err("engine.max_write_attempts must be at least 1".into()));
        }
        if self.sweep.batch_size == 0 || self.sweep.batch_size > MAX_PAGE_SIZE {
            return Err(config_err(format!(
                "sweep.batch_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.sweep.batch_size
            )));
        }
        if self.sweep.concurrency == 0 {
            return Err(config_err("sweep.concurrency must be at least 1".into()));
        }
        Ok(())
    }
}

fn config_err(reason: String) -> WarmthError {
    WarmthError::ConfigError { reason }
}
