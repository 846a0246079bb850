//! The APEX pipeline: a single reusable inter-stage latch, and the
//! load-use hazard check that decides whether decode may proceed.

/// Load-use hazard detection.
pub mod hazards;

/// The inter-stage latch shared by all five stages.
pub mod latches;

pub use hazards::need_stall_load_use;
pub use latches::{describe, Latch};
