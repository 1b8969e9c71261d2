use serde::{Deserialize, Serialize};

use crate::relationship::Band;

/// Answer to "what is the score right now".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentScore {
    pub score: u8,
    pub band: Band,
    pub amplitude_now: f64,
}
