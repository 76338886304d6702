//! Arm safety interlock
//!
//! The extension and tilt joints are coupled: with the arm tilted low, extending drives the
//! carriage into the frame, and tilting down with the arm extended does the same. These
//! predicates are re-evaluated from the current positions every time a demand is issued.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use hw_if::eqpt::{Joint, JointDem};

use super::ArmCtrlParams;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// True if the extension may be driven at the given tilt.
pub fn is_extend_safe(tilt_pos: f64, params: &ArmCtrlParams) -> bool {
    tilt_pos >= params.min_safe_tilt_in
}

/// True if the tilt may be driven with the arm at the given position.
pub fn is_tilt_safe(extension_pos: f64, tilt_pos: f64, params: &ArmCtrlParams) -> bool {
    tilt_pos > params.min_safe_tilt_in || extension_pos <= params.retracted_extension_in
}

/// True if the demand on the joint is permitted with the arm at the given positions.
///
/// While a joint is unsafe every demand on it other than a stop is vetoed, whichever way it would
/// move the joint. The only way out of an unsafe position is the soft-limit override.
pub fn is_permitted(
    joint: Joint,
    dem: &JointDem,
    extension_pos: f64,
    tilt_pos: f64,
    params: &ArmCtrlParams,
) -> bool {
    if dem.is_stop() {
        return true;
    }

    match joint {
        Joint::Extension => is_extend_safe(tilt_pos, params),
        Joint::Tilt => is_tilt_safe(extension_pos, tilt_pos, params),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
