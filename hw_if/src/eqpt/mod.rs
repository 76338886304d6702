//! # Equipment ports
//!
//! Each port is implemented by an external driver (or by the simulation) and consumed by the arm
//! software. Ports never fail: a driver that loses its hardware is expected to report its last
//! known state and ignore demands.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod arm;
pub mod drive;
pub mod suction;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use arm::{ActuatorPort, Joint, JointDem, SoftLimits};
pub use drive::{Drivetrain, Trajectory};
pub use suction::EndEffector;
