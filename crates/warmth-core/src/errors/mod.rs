//! Error taxonomy for the warmth engine.

mod storage_error;
mod warmth_error;

pub use storage_error::StorageError;
pub use warmth_error::{WarmthError, WarmthResult};
