//! Autonomous routines
//!
//! Every routine is built fresh from the parameters, so the chooser can hand out a new instance
//! each time one is selected.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::{Joint, Trajectory};

use super::{
    drive::{FollowTrajectory, ZeroHeading},
    AutoParams,
};
use crate::{
    action::{
        ActionExt, DriveJointToPosition, Parallel, Sequential, SuctionCmd, WaitForDuration,
        WaitUntil,
    },
    motions::{self, MotionParams},
};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Pick up the preloaded piece and score it in the high position.
///
/// The routine waits on the vacuum seal without a timeout, if no seal forms it holds at that
/// step until the autonomous period ends.
pub fn auto_score_high(m: &MotionParams, a: &AutoParams) -> Sequential {
    Sequential::new(
        "AutoScoreHigh",
        vec![
            SuctionCmd::enable().boxed(),
            DriveJointToPosition::new(Joint::Tilt, a.arm_speed, a.pickup_tilt_in).boxed(),
            DriveJointToPosition::new(Joint::Extension, a.arm_speed, a.pickup_extension_in)
                .boxed(),
            WaitUntil::new("VacuumSeal", |r| r.suction.has_vacuum_seal()).boxed(),
            DriveJointToPosition::new(Joint::Extension, a.arm_speed, m.retract_in).boxed(),
            motions::score_high(m, a.arm_speed).boxed(),
            WaitForDuration::new(a.release_wait_s).boxed(),
            SuctionCmd::disable().boxed(),
            motions::reset_arm(m, a.arm_speed).boxed(),
        ],
    )
}

/// Score, then reset the arm while following the first leg, then follow the second leg.
pub fn auto_score_balance(
    m: &MotionParams,
    a: &AutoParams,
    first_leg: &Trajectory,
    second_leg: &Trajectory,
) -> Sequential {
    Sequential::new(
        "AutoScoreBalance",
        vec![
            auto_score_high(m, a).boxed(),
            reset_while_following(m, a, first_leg).boxed(),
            FollowTrajectory::new(second_leg, false).boxed(),
        ],
    )
}

/// Follow a single trajectory and zero the heading at the end of it.
pub fn auto_move(trajectory: &Trajectory) -> Sequential {
    Sequential::new(
        "AutoMove",
        vec![
            FollowTrajectory::new(trajectory, true).boxed(),
            ZeroHeading.boxed(),
        ],
    )
}

/// Score, then reset the arm while moving off, then zero the heading.
pub fn auto_score_move(m: &MotionParams, a: &AutoParams, trajectory: &Trajectory) -> Sequential {
    Sequential::new(
        "AutoScoreMove",
        vec![
            auto_score_high(m, a).boxed(),
            reset_while_following(m, a, trajectory).boxed(),
            ZeroHeading.boxed(),
        ],
    )
}

/// Drive onto the charge station in two legs, without touching the arm.
pub fn auto_balance(first_leg: &Trajectory, second_leg: &Trajectory) -> Sequential {
    Sequential::new(
        "AutoBalance",
        vec![
            FollowTrajectory::new(first_leg, true).boxed(),
            FollowTrajectory::new(second_leg, false).boxed(),
        ],
    )
}

fn reset_while_following(m: &MotionParams, a: &AutoParams, trajectory: &Trajectory) -> Parallel {
    Parallel::all(
        "ResetWhileFollowing",
        vec![
            motions::reset_arm(m, a.reset_speed).boxed(),
            FollowTrajectory::new(trajectory, true).boxed(),
        ],
    )
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
