use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Impulse weight overrides keyed by interaction kind name
/// (`meeting`, `call`, `dm`, `sms`, `email`, `note`, `other`).
/// Kinds without an override keep their built-in weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpulseConfig {
    pub weights: BTreeMap<String, f64>,
}
