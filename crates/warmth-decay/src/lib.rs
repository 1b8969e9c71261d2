//! # warmth-decay
//!
//! Pure scoring model for relationship warmth.
//! Amplitude decays as `a · e^(−λ·days)`; the displayed score is
//! `round(clamp(30 + amplitude, 0, 100))`, banded by fixed thresholds.
//! No I/O and no shared mutable state.

pub mod formula;
pub mod impulse;
pub mod registry;
pub mod replay;

pub use formula::{band, decay, evaluate, score};
pub use impulse::ImpulseTable;
pub use registry::ModeRegistry;
