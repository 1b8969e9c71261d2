//! # warmth-core
//!
//! Foundation crate for the warmth scoring engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod relationship;
pub mod time;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::WarmthConfig;
pub use errors::{WarmthError, WarmthResult};
pub use relationship::{Anchor, Band, DecayMode, Interaction, InteractionKind, VersionedAnchor};
