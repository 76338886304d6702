//! # Robot context
//!
//! Every action is handed the [`Robot`] when it is initialised, executed, checked or ended. The
//! robot owns the handles to all collaborators, so an action only ever touches hardware through
//! this context and never through shared global state.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::{
    eqpt::{Drivetrain, EndEffector, Joint},
    input::{OperatorFeedback, OperatorInput},
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use util::time::Clock;

use crate::arm_ctrl::ArmCtrl;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Operating mode of the robot, set by the match controller.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RobotMode {
    Disabled,
    Autonomous,
    Teleop,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct Robot {
    /// Arm control, the only path to the arm actuators
    pub arm: ArmCtrl,

    /// Suction end-effector
    pub suction: Box<dyn EndEffector>,

    /// Drivetrain
    pub drive: Box<dyn Drivetrain>,

    /// Controller rumble
    pub feedback: Box<dyn OperatorFeedback>,

    /// Cycle clock, all action timing is measured against this
    pub clock: Clock,

    /// Current operating mode
    pub mode: RobotMode,

    /// Operator input sampled at the start of this cycle
    pub input: OperatorInput,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Robot {
    pub fn new(
        arm: ArmCtrl,
        suction: Box<dyn EndEffector>,
        drive: Box<dyn Drivetrain>,
        feedback: Box<dyn OperatorFeedback>,
        clock: Clock,
    ) -> Self {
        Self {
            arm,
            suction,
            drive,
            feedback,
            clock,
            mode: RobotMode::Disabled,
            input: OperatorInput::default(),
        }
    }

    /// Command zero output on everything that moves.
    ///
    /// The suction is left as it is so that a held piece is not dropped.
    pub fn make_safe(&mut self) {
        for joint in Joint::ALL.iter() {
            self.arm.stop(*joint);
        }
        self.drive.stop();
        self.feedback.set_rumble(0.0);
    }

    pub fn is_teleop(&self) -> bool {
        self.mode == RobotMode::Teleop
    }
}

impl Display for RobotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RobotMode::Disabled => write!(f, "Disabled"),
            RobotMode::Autonomous => write!(f, "Autonomous"),
            RobotMode::Teleop => write!(f, "Teleop"),
        }
    }
}
