//! Relationship-level domain types: the persisted anchor and the enums it
//! is scored with.

mod anchor;
mod band;
mod interaction;
mod mode;

pub use anchor::{Anchor, VersionedAnchor};
pub use band::Band;
pub use interaction::{Interaction, InteractionKind};
pub use mode::DecayMode;
