use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of interaction that produces an impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Meeting,
    Call,
    Dm,
    Sms,
    Email,
    Note,
    Other,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 7] = [
        Self::Meeting,
        Self::Call,
        Self::Dm,
        Self::Sms,
        Self::Email,
        Self::Note,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Call => "call",
            Self::Dm => "dm",
            Self::Sms => "sms",
            Self::Email => "email",
            Self::Note => "note",
            Self::Other => "other",
        }
    }

    /// Lenient parse. Unrecognized kinds fall back to `Other`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "meeting" => Self::Meeting,
            "call" => Self::Call,
            "dm" => Self::Dm,
            "sms" => Self::Sms,
            "email" => Self::Email,
            "note" => Self::Note,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single logged interaction, as replayed by a history rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub occurred_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(kind: InteractionKind, occurred_at: DateTime<Utc>) -> Self {
        Self { kind, occurred_at }
    }
}
