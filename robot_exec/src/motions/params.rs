//! Parameters for the composed arm motions

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Targets and timeouts of the composed motions.
///
/// All positions are in inches of joint travel and all timeouts in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    // ---- GENERAL ----
    /// Timeout applied to tilt steps without a timeout of their own
    pub tilt_timeout_s: f64,

    /// Extension target of every retract step
    pub retract_in: f64,

    // ---- HIGH ----
    pub high_tilt_in: f64,
    pub high_extension_in: f64,

    /// Tilt the arm drops to, from the high position, to release a piece
    pub high_score_tilt_in: f64,

    // ---- MEDIUM ----
    pub medium_retract_timeout_s: f64,
    pub medium_tilt_in: f64,
    pub medium_tilt_timeout_s: f64,
    pub medium_extension_in: f64,
    pub medium_extension_timeout_s: f64,

    /// Tilt the arm drops to, from the medium position, to release a piece
    pub medium_score_tilt_in: f64,

    /// Fraction of the motion speed used for the medium release
    pub medium_score_speed_factor: f64,

    // ---- LOW ----
    pub low_retract_timeout_s: f64,
    pub low_tilt_in: f64,
    pub low_tilt_timeout_s: f64,
    pub low_extension_in: f64,
    pub low_extension_timeout_s: f64,

    // ---- PICKUP ----
    pub pickup_tilt_in: f64,

    // ---- RESET ----
    /// Tilt of the stowed arm
    pub stow_tilt_in: f64,
    pub reset_retract_timeout_s: f64,
    pub reset_tilt_timeout_s: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            tilt_timeout_s: 1.5,
            retract_in: 0.0,

            high_tilt_in: 16.5,
            high_extension_in: 27.5,
            high_score_tilt_in: 14.5,

            medium_retract_timeout_s: 1.0,
            medium_tilt_in: 15.0,
            medium_tilt_timeout_s: 1.5,
            medium_extension_in: 12.0,
            medium_extension_timeout_s: 1.0,
            medium_score_tilt_in: 11.5,
            medium_score_speed_factor: 0.5,

            low_retract_timeout_s: 1.0,
            low_tilt_in: 10.0,
            low_tilt_timeout_s: 1.5,
            low_extension_in: 6.0,
            low_extension_timeout_s: 1.0,

            pickup_tilt_in: 12.6,

            stow_tilt_in: 0.0,
            reset_retract_timeout_s: 1.0,
            reset_tilt_timeout_s: 1.5,
        }
    }
}
