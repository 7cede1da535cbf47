//! Deterministic simulation module
//!
//! All head physics and elimination logic lives here. This module must be
//! pure and deterministic:
//! - Frame deltas are sanitized before use
//! - Seeded RNG only
//! - Stable iteration order (by head ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod outcome;
pub mod state;
pub mod tick;

#[cfg(test)]
mod properties;

pub use collision::{CollisionResult, contain, head_collision, normalize_speed};
pub use outcome::{Outcome, OutcomeTracker};
pub use state::{Head, HeadsState, SimPhase, Tuning, Viewport};
pub use tick::{SimEvent, StepReport, sanitize_dt, step};
