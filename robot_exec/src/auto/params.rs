//! Parameters for the autonomous routines

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Trajectory;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoParams {
    /// Length of the autonomous period.
    ///
    /// Units: seconds
    pub period_s: f64,

    /// Name of the chooser option run by the executable
    pub default_routine: String,

    /// Arm speed used by the scoring sequence
    pub arm_speed: f64,

    /// Arm speed used when resetting the arm alongside a trajectory
    pub reset_speed: f64,

    // ---- PRELOAD PICKUP ----
    /// Tilt the arm moves to before reaching for the preloaded piece.
    ///
    /// Units: inches
    pub pickup_tilt_in: f64,

    /// Extension the arm reaches to for the preloaded piece.
    ///
    /// Units: inches
    pub pickup_extension_in: f64,

    /// Time the suction is held after scoring before it is released.
    ///
    /// Units: seconds
    pub release_wait_s: f64,

    // ---- TRAJECTORIES ----
    /// Pre-planned paths available to the routines, looked up by name
    pub trajectories: Vec<Trajectory>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for AutoParams {
    fn default() -> Self {
        Self {
            period_s: 15.0,
            default_routine: String::from("Score"),
            arm_speed: 0.15,
            reset_speed: 1.0,
            pickup_tilt_in: 0.67,
            pickup_extension_in: 5.1,
            release_wait_s: 0.5,
            trajectories: vec![
                Trajectory::new("Balance", 1.0, 1.0),
                Trajectory::new("Balance Mid", 1.0, 1.0),
                Trajectory::new("Move Wall", 1.5, 1.5),
                Trajectory::new("Move Divider", 1.5, 1.5),
                Trajectory::new("Move Middle", 3.0, 3.0),
                Trajectory::new("Wall Balance", 2.0, 3.0),
                Trajectory::new("Divider Balance", 2.0, 3.0),
                Trajectory::new("Middle Balance", 2.0, 3.0),
            ],
        }
    }
}
