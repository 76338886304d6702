//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmCtrlParams {
    // ---- INTERLOCK ----
    /// Lowest tilt at which the arm may extend, and at or below which the arm may only tilt down
    /// while retracted.
    ///
    /// Units: inches
    pub min_safe_tilt_in: f64,

    /// Extension at or below which the arm counts as retracted.
    ///
    /// Units: inches
    pub retracted_extension_in: f64,

    // ---- POSITION CONTROL ----
    /// Distance from a position target within which the joint counts as arrived.
    ///
    /// Units: inches
    pub arrival_tolerance_in: f64,

    // ---- OVERRIDE ----
    /// Speed magnitude used to drive a joint onto its reverse stop when soft limits are
    /// overridden.
    pub override_speed: f64,

    /// Position a joint is re-zeroed to at the end of an override.
    ///
    /// Units: inches
    pub override_zero_pos_in: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ArmCtrlParams {
    fn default() -> Self {
        Self {
            min_safe_tilt_in: 10.0,
            retracted_extension_in: 0.0,
            arrival_tolerance_in: 0.5,
            override_speed: 0.2,
            override_zero_pos_in: 0.0,
        }
    }
}
