use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WarmthError;

/// Categorical label derived from a score. Ordered coldest to hottest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Unreachable from non-negative amplitude; kept for legacy and
    /// manually overridden scores.
    Cold,
    Cool,
    Neutral,
    Warm,
    Hot,
}

impl Band {
    pub const HOT: u8 = 80;
    pub const WARM: u8 = 60;
    pub const NEUTRAL: u8 = 40;
    pub const COOL: u8 = 20;

    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= Self::HOT => Self::Hot,
            s if s >= Self::WARM => Self::Warm,
            s if s >= Self::NEUTRAL => Self::Neutral,
            s if s >= Self::COOL => Self::Cool,
            _ => Self::Cold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::Neutral => "neutral",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = WarmthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cold" => Ok(Self::Cold),
            "cool" => Ok(Self::Cool),
            "neutral" => Ok(Self::Neutral),
            "warm" => Ok(Self::Warm),
            "hot" => Ok(Self::Hot),
            _ => Err(WarmthError::InvalidInput {
                reason: format!("unknown band: {s}"),
            }),
        }
    }
}
