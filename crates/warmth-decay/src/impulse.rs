use warmth_core::config::{defaults, ImpulseConfig};
use warmth_core::{InteractionKind, WarmthError, WarmthResult};

/// Fixed mapping from interaction kind to the amplitude it adds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseTable {
    meeting: f64,
    call: f64,
    dm: f64,
    sms: f64,
    email: f64,
    note: f64,
    other: f64,
}

impl ImpulseTable {
    /// Built-in weights with configured overrides applied.
    pub fn from_config(config: &ImpulseConfig) -> WarmthResult<Self> {
        let mut table = Self::default();
        for (name, weight) in &config.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(WarmthError::ConfigError {
                    reason: format!("impulse weight for {name} must be non-negative, got {weight}"),
                });
            }
            let kind = InteractionKind::parse(name);
            if kind == InteractionKind::Other && !name.trim().eq_ignore_ascii_case("other") {
                return Err(WarmthError::ConfigError {
                    reason: format!("unknown interaction kind {name:?}"),
                });
            }
            *table.slot(kind) = *weight;
        }
        Ok(table)
    }

    pub fn weight(&self, kind: InteractionKind) -> f64 {
        match kind {
            InteractionKind::Meeting => self.meeting,
            InteractionKind::Call => self.call,
            InteractionKind::Dm => self.dm,
            InteractionKind::Sms => self.sms,
            InteractionKind::Email => self.email,
            InteractionKind::Note => self.note,
            InteractionKind::Other => self.other,
        }
    }

    /// Weight for a raw kind name. Unrecognized names get the `other` weight.
    pub fn weight_for_name(&self, name: &str) -> f64 {
        self.weight(InteractionKind::parse(name))
    }

    fn slot(&mut self, kind: InteractionKind) -> &mut f64 {
        match kind {
            InteractionKind::Meeting => &mut self.meeting,
            InteractionKind::Call => &mut self.call,
            InteractionKind::Dm => &mut self.dm,
            InteractionKind::Sms => &mut self.sms,
            InteractionKind::Email => &mut self.email,
            InteractionKind::Note => &mut self.note,
            InteractionKind::Other => &mut self.other,
        }
    }
}

impl Default for ImpulseTable {
    fn default() -> Self {
        Self {
            meeting: defaults::DEFAULT_WEIGHT_MEETING,
            call: defaults::DEFAULT_WEIGHT_CALL,
            dm: defaults::DEFAULT_WEIGHT_DM,
            sms: defaults::DEFAULT_WEIGHT_SMS,
            email: defaults::DEFAULT_WEIGHT_EMAIL,
            note: defaults::DEFAULT_WEIGHT_NOTE,
            other: defaults::DEFAULT_WEIGHT_OTHER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let table = ImpulseTable::default();
        assert_eq!(table.weight(InteractionKind::Meeting), 9.0);
        assert_eq!(table.weight(InteractionKind::Call), 7.0);
        assert_eq!(table.weight(InteractionKind::Dm), 4.0);
        assert_eq!(table.weight(InteractionKind::Sms), 4.0);
        assert_eq!(table.weight(InteractionKind::Email), 5.0);
        assert_eq!(table.weight(InteractionKind::Note), 3.0);
        assert_eq!(table.weight(InteractionKind::Other), 5.0);
    }

    #[test]
    fn unknown_names_use_other_weight() {
        let table = ImpulseTable::default();
        assert_eq!(table.weight_for_name("linkedin_poke"), 5.0);
    }

    #[test]
    fn overrides_replace_single_kinds() {
        let mut config = ImpulseConfig::default();
        config.weights.insert("note".into(), 1.5);
        let table = ImpulseTable::from_config(&config).unwrap();
        assert_eq!(table.weight(InteractionKind::Note), 1.5);
        assert_eq!(table.weight(InteractionKind::Meeting), 9.0);
    }

    #[test]
    fn override_for_unknown_kind_is_rejected() {
        let mut config = ImpulseConfig::default();
        config.weights.insert("telegram".into(), 2.0);
        assert!(ImpulseTable::from_config(&config).is_err());
    }
}
