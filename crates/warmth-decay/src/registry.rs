use std::f64::consts::LN_2;

use warmth_core::config::{DecayConfig, LambdaTable};
use warmth_core::constants::{ATTENTION_THRESHOLD, SCORE_MAX};
use warmth_core::{DecayMode, WarmthError, WarmthResult};

/// Immutable mode → λ table, loaded once and passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeRegistry {
    lambdas: LambdaTable,
    default_mode: DecayMode,
}

impl ModeRegistry {
    /// Build from validated decay configuration.
    pub fn from_config(config: &DecayConfig) -> WarmthResult<Self> {
        Self::new(config.lambda_per_day, config.default_mode)
    }

    pub fn new(lambdas: LambdaTable, default_mode: DecayMode) -> WarmthResult<Self> {
        for mode in DecayMode::ALL {
            let lambda = lambdas.get(mode);
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(WarmthError::ConfigError {
                    reason: format!("lambda for {mode} must be positive and finite, got {lambda}"),
                });
            }
        }
        Ok(Self {
            lambdas,
            default_mode,
        })
    }

    /// Decay constant per day.
    pub fn lambda(&self, mode: DecayMode) -> f64 {
        self.lambdas.get(mode)
    }

    /// Days for amplitude to halve: `ln 2 / λ`.
    pub fn half_life_days(&self, mode: DecayMode) -> f64 {
        LN_2 / self.lambda(mode)
    }

    /// Whole days until a relationship at `score` decays to the attention
    /// threshold: `max(0, round(ln(score / 30) / λ))`. Zero when it is
    /// already at or below the threshold.
    pub fn days_until_attention(&self, score: u8, mode: DecayMode) -> u32 {
        let score = f64::from(score);
        if score <= ATTENTION_THRESHOLD {
            return 0;
        }
        let days = (score / ATTENTION_THRESHOLD).ln() / self.lambda(mode);
        days.round().max(0.0) as u32
    }

    /// Days from a maximal score to the attention threshold; the natural
    /// gap between touches for `mode`.
    pub fn days_to_reachout(&self, mode: DecayMode) -> f64 {
        (SCORE_MAX / ATTENTION_THRESHOLD).ln() / self.lambda(mode)
    }

    /// Mode given to anchors created on first interaction.
    pub fn default_mode(&self) -> DecayMode {
        self.default_mode
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self {
            lambdas: LambdaTable::default(),
            default_mode: DecayMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_half_lives() {
        let registry = ModeRegistry::default();
        assert!((registry.half_life_days(DecayMode::Slow) - 17.27).abs() < 0.01);
        assert!((registry.half_life_days(DecayMode::Medium) - 8.06).abs() < 0.01);
        assert!((registry.half_life_days(DecayMode::Fast) - 4.03).abs() < 0.01);
        // Test mode halves in about seven hours.
        assert!((registry.half_life_days(DecayMode::Test) * 24.0 - 6.91).abs() < 0.01);
    }

    #[test]
    fn attention_is_due_now_at_or_below_threshold() {
        let registry = ModeRegistry::default();
        for mode in DecayMode::ALL {
            assert_eq!(registry.days_until_attention(30, mode), 0);
            assert_eq!(registry.days_until_attention(12, mode), 0);
            assert_eq!(registry.days_until_attention(0, mode), 0);
        }
    }

    #[test]
    fn days_until_attention_per_mode() {
        let registry = ModeRegistry::default();
        assert_eq!(registry.days_until_attention(80, DecayMode::Slow), 24);
        assert_eq!(registry.days_until_attention(80, DecayMode::Medium), 11);
        assert_eq!(registry.days_until_attention(80, DecayMode::Fast), 6);
        assert_eq!(registry.days_until_attention(80, DecayMode::Test), 0);
        assert_eq!(registry.days_until_attention(100, DecayMode::Medium), 14);
    }

    #[test]
    fn reachout_gaps_per_mode() {
        let registry = ModeRegistry::default();
        assert!((registry.days_to_reachout(DecayMode::Slow) - 30.0).abs() < 0.1);
        assert!((registry.days_to_reachout(DecayMode::Medium) - 14.0).abs() < 0.1);
        assert!((registry.days_to_reachout(DecayMode::Fast) - 7.0).abs() < 0.1);
        assert!((registry.days_to_reachout(DecayMode::Test) - 0.5).abs() < 0.01);
    }

    #[test]
    fn rejects_non_positive_lambda() {
        let lambdas = LambdaTable {
            fast: -1.0,
            ..LambdaTable::default()
        };
        assert!(ModeRegistry::new(lambdas, DecayMode::Medium).is_err());
    }
}
