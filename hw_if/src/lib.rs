//! # Hardware interfaces
//!
//! Interfaces to the collaborators of the arm software: the arm actuators, the suction
//! end-effector, the drivetrain and the operators. Drivers for real hardware and the simulation
//! both implement these traits.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Equipment ports (arm actuators, suction, drivetrain)
pub mod eqpt;

/// Operator gamepads and feedback
pub mod input;
