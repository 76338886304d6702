//! Arm control module
//!
//! [`ArmCtrl`] owns the arm's [`ActuatorPort`](hw_if::eqpt::ActuatorPort) and is the only way any
//! action can command the arm. Every speed or position demand passes through the safety interlock
//! immediately before it is issued, and a vetoed demand is replaced by a zero speed demand so the
//! joint holds under brake.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod interlock;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use interlock::{is_extend_safe, is_tilt_safe};
pub use params::*;
pub use state::*;
