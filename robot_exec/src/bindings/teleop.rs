//! Operator control mapping used in teleop

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Joint;
use serde::{Deserialize, Serialize};

use super::Bindings;
use crate::{
    action::{ActionExt, JointOverride, RunJointAtSpeed, SuctionCmd},
    auto::ZeroHeading,
    feedback::{RumbleControllers, RumblePattern},
    motions::{self, MotionParams},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleopParams {
    /// Stick deflection beyond which the stick takes manual control of a joint
    pub stick_threshold: f64,

    /// Speed of the composed motions started from the D-pad
    pub motion_speed: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for TeleopParams {
    fn default() -> Self {
        Self {
            stick_threshold: 0.1,
            motion_speed: 1.0,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the teleop binding table.
///
/// Bindings are applied in the order they are added here, so where two fire in the same cycle
/// on the same joint the later one wins.
pub fn teleop_bindings(motions: &MotionParams, params: &TeleopParams) -> Bindings {
    let mut b = Bindings::new();
    let threshold = params.stick_threshold;
    let speed = params.motion_speed;

    // ---- SUCTION ----

    b.on_true("A", |r| r.input.manipulator.a, || SuctionCmd::toggle().boxed());

    // ---- MANUAL JOINT CONTROL ----

    b.while_true(
        "LeftStick",
        move |r| r.input.manipulator.left_y.abs() > threshold,
        || RunJointAtSpeed::new(Joint::Extension, |r| r.input.manipulator.left_y).boxed(),
    );
    b.while_true(
        "RightStick",
        move |r| r.input.manipulator.right_y.abs() > threshold,
        || RunJointAtSpeed::new(Joint::Tilt, |r| r.input.manipulator.right_y).boxed(),
    );
    b.while_true(
        "Back",
        |r| r.input.manipulator.back,
        || JointOverride::new(Joint::Extension).boxed(),
    );
    b.while_true(
        "Start",
        |r| r.input.manipulator.start,
        || JointOverride::new(Joint::Tilt).boxed(),
    );

    // ---- COMPOSED MOTIONS ----

    let m = motions.clone();
    b.while_true(
        "Pov0",
        |r| r.input.manipulator.is_pov(0),
        move || motions::move_to_high(&m, speed).boxed(),
    );
    let m = motions.clone();
    b.while_true(
        "Pov90",
        |r| r.input.manipulator.is_pov(90),
        move || motions::move_to_medium(&m, speed).boxed(),
    );
    let m = motions.clone();
    b.while_true(
        "Pov180",
        |r| r.input.manipulator.is_pov(180),
        move || motions::move_to_low(&m, speed).boxed(),
    );
    let m = motions.clone();
    b.while_true(
        "Pov270",
        |r| r.input.manipulator.is_pov(270),
        move || motions::move_to_pickup(&m, speed).boxed(),
    );
    let m = motions.clone();
    b.while_true(
        "Pov0+Y",
        |r| r.input.manipulator.is_pov(0) && r.input.manipulator.y,
        move || motions::score_high(&m, speed).boxed(),
    );
    let m = motions.clone();
    b.while_true(
        "Pov90+Y",
        |r| r.input.manipulator.is_pov(90) && r.input.manipulator.y,
        move || motions::score_medium(&m, speed).boxed(),
    );

    // ---- FEEDBACK ----

    b.on_true(
        "MinVacuum",
        |r| r.is_teleop() && r.suction.has_min_vacuum(),
        || RumbleControllers::new(RumblePattern::Good).boxed(),
    );
    b.on_false(
        "MinVacuum",
        |r| r.is_teleop() && r.suction.has_min_vacuum(),
        || RumbleControllers::new(RumblePattern::Bad).boxed(),
    );

    // ---- DRIVER ----

    b.on_true("DriverBack", |r| r.input.driver.back, || ZeroHeading.boxed());

    b
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
