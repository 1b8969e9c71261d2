//! Persistence contracts consumed by the engine.

mod anchor_store;
mod score_cache_store;

pub use anchor_store::IAnchorStore;
pub use score_cache_store::IScoreCacheStore;
