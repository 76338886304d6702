//! # Robot library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the robot crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Action model - the action trait, primitive actions, combinators and the scheduler
pub mod action;

/// Arm control - the only path to the arm actuators, gated by the safety interlock
pub mod arm_ctrl;

/// Autonomous routines and the routine chooser
pub mod auto;

/// Trigger bindings - turns polled operator input into scheduled actions
pub mod bindings;

/// Global data store for the executable
pub mod data_store;

/// Operator feedback actions
pub mod feedback;

/// Composed arm motions (move-to and score positions)
pub mod motions;

/// Executable parameters
pub mod params;

/// The robot context passed to every action
pub mod robot;

/// Simulated collaborators
pub mod sim;

/// Arm telemetry
pub mod tm;

#[cfg(test)]
pub(crate) mod test_util;
