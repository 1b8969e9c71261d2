use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WarmthError;

/// Named decay-rate profile selectable per relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayMode {
    Slow,
    Medium,
    Fast,
    /// Accelerated profile for diagnostics; cools within hours.
    Test,
}

impl DecayMode {
    pub const ALL: [DecayMode; 4] = [Self::Slow, Self::Medium, Self::Fast, Self::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
            Self::Test => "test",
        }
    }
}

impl Default for DecayMode {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for DecayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecayMode {
    type Err = WarmthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "medium" => Ok(Self::Medium),
            "fast" => Ok(Self::Fast),
            "test" => Ok(Self::Test),
            _ => Err(WarmthError::UnknownMode {
                name: s.to_string(),
            }),
        }
    }
}
