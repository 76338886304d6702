//! # Drivetrain port
//!
//! Trajectory generation and following belong to the drivetrain. The arm software only starts a
//! pre-planned trajectory and waits for the drivetrain to report it complete.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Opaque handle on a planned path, resolved by the drivetrain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Name of the planned path
    pub name: String,

    /// Velocity constraint the path was planned with.
    ///
    /// Units: meters/second
    pub max_vel_ms: f64,

    /// Acceleration constraint the path was planned with.
    ///
    /// Units: meters/second^2
    pub max_accel_mss: f64,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

pub trait Drivetrain {
    /// Begin following the trajectory, optionally resetting odometry to its start pose.
    fn start_trajectory(&mut self, trajectory: &Trajectory, reset_pose: bool);

    /// True once the trajectory in progress has been completed.
    fn is_trajectory_complete(&self) -> bool;

    /// Stop all drive motion.
    fn stop(&mut self);

    /// Set the current heading of the gyro as zero.
    fn zero_heading(&mut self);
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl Trajectory {
    pub fn new(name: &str, max_vel_ms: f64, max_accel_mss: f64) -> Self {
        Self {
            name: String::from(name),
            max_vel_ms,
            max_accel_mss,
        }
    }
}
