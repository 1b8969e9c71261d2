use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Look-back window for score history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryWindow {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl HistoryWindow {
    /// Longest look-back served; older snapshots are pruned by the sweep.
    pub const LONGEST: Self = Self::Quarter;

    /// Parse `7d`, `30d` or `90d`. Anything else falls back to `30d`.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim() {
            "7d" => Self::Week,
            "30d" => Self::Month,
            "90d" => Self::Quarter,
            _ => Self::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
            Self::Quarter => Duration::days(90),
        }
    }
}
