//! # Arm actuator port

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt::Display;

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// The controllable degrees of freedom of the arm.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub enum Joint {
    /// Telescoping extension. Positive speed extends.
    ///
    /// Units: inches
    Extension,

    /// Tilt of the whole arm. Positive speed tilts up.
    ///
    /// Units: inches of tilt screw travel
    Tilt,
}

/// The single authoritative demand on a joint for one control cycle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum JointDem {
    /// Open loop output in the range [-1, 1].
    Speed(f64),

    /// Closed loop position target, with the output range scaled by `speed_scale`.
    Position { target: f64, speed_scale: f64 },
}

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Software travel bounds of a joint, distinct from its hard stops.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct SoftLimits {
    pub min: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Capability exposed by the arm's motor driver.
pub trait ActuatorPort {
    /// Command an open loop output in the range [-1, 1].
    fn set_speed(&mut self, joint: Joint, value: f64);

    /// Command a closed loop position target.
    ///
    /// `speed_scale` scales the controller's output range, 1.0 being full speed.
    fn set_target_position(&mut self, joint: Joint, value: f64, speed_scale: f64);

    /// Current position of the joint.
    fn get_position(&self, joint: Joint) -> f64;

    /// Enable or disable both soft travel limits of the joint.
    fn set_soft_limits_enabled(&mut self, joint: Joint, enabled: bool);

    /// Overwrite the position reported by the joint's sensor.
    fn reset_position(&mut self, joint: Joint, position: f64);
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl Joint {
    /// Both joints, in the order they are reported in telemetry.
    pub const ALL: [Joint; 2] = [Joint::Extension, Joint::Tilt];
}

impl Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Joint::Extension => write!(f, "Extension"),
            Joint::Tilt => write!(f, "Tilt"),
        }
    }
}

impl JointDem {
    /// True if the demand is for zero output.
    pub fn is_stop(&self) -> bool {
        match *self {
            JointDem::Speed(s) => s == 0.0,
            JointDem::Position { .. } => false,
        }
    }
}

impl SoftLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a position into the limits.
    pub fn clamp(&self, position: f64) -> f64 {
        position.max(self.min).min(self.max)
    }
}
