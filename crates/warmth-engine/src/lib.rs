//! # warmth-engine
//!
//! Runtime operations over the anchor store:
//! - [`reader`]: compute the current score without writing
//! - [`applier`]: fold an interaction into the anchor with CAS retries
//! - [`switcher`]: change decay mode with score continuity
//! - [`recompute`]: paginated, cancelable cache sweep
//! - [`alerts`]: band-crossing detection for sweeps
//!
//! [`WarmthEngine`] wires them to configuration and stores.

pub mod alerts;
pub mod applier;
pub mod engine;
pub mod reader;
pub mod recompute;
pub mod retry;
pub mod switcher;

pub use alerts::AlertPolicy;
pub use engine::{SweepCancel, WarmthEngine};
pub use recompute::SweepOptions;
pub use retry::{RetryPolicy, WriteContext};
