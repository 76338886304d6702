//! # Simulated collaborators
//!
//! Stand-ins for the arm motor drivers, the suction end-effector, the drivetrain and the
//! controller rumble, so the executable can run without robot hardware.
//!
//! Every simulated part is a cheap handle onto shared state. The [`Sim`] keeps one handle to step
//! the dynamics forward and hands the other to the [`Robot`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod arm;
mod drive;
mod feedback;
mod suction;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::SoftLimits;
use serde::{Deserialize, Serialize};
use util::time::Clock;

use crate::{
    arm_ctrl::{ArmCtrl, ArmCtrlParams},
    robot::Robot,
};

pub use arm::SimArm;
pub use drive::SimDrive;
pub use feedback::SimFeedback;
pub use suction::SimSuction;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    // ---- ARM ----
    /// Joint rate at full output, [extension, tilt].
    ///
    /// Units: inches/second
    pub max_rate_in_s: [f64; 2],

    /// Proportional gain of the simulated position controllers.
    ///
    /// Units: output/inch
    pub position_gain: f64,

    /// Soft travel limits, [extension, tilt].
    ///
    /// Units: inches
    pub soft_limits: [SoftLimits; 2],

    /// Hard stops, reached only with the soft limits disabled, [extension, tilt].
    ///
    /// Units: inches
    pub hard_stops: [SoftLimits; 2],

    /// Position of the joints at start up, [extension, tilt].
    ///
    /// Units: inches
    pub initial_position_in: [f64; 2],

    // ---- SUCTION ----
    /// If true a game piece is in reach of the suction cup
    pub piece_present: bool,

    /// Time after the suction is enabled before the minimum vacuum is reached.
    ///
    /// Units: seconds
    pub min_vacuum_delay_s: f64,

    /// Time after the suction is enabled before the cup seals.
    ///
    /// Units: seconds
    pub seal_delay_s: f64,

    // ---- DRIVE ----
    /// Time taken to follow any trajectory.
    ///
    /// Units: seconds
    pub trajectory_duration_s: f64,
}

/// The full set of simulated collaborators.
pub struct Sim {
    pub arm: SimArm,
    pub suction: SimSuction,
    pub drive: SimDrive,
    pub feedback: SimFeedback,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            max_rate_in_s: [40.0, 30.0],
            position_gain: 0.5,
            soft_limits: [SoftLimits::new(0.0, 28.0), SoftLimits::new(0.0, 17.0)],
            hard_stops: [SoftLimits::new(-2.0, 30.0), SoftLimits::new(-1.0, 18.0)],
            initial_position_in: [0.0, 0.0],
            piece_present: true,
            min_vacuum_delay_s: 0.2,
            seal_delay_s: 0.4,
            trajectory_duration_s: 2.0,
        }
    }
}

impl Sim {
    pub fn new(params: &SimParams) -> Self {
        Self {
            arm: SimArm::new(params),
            suction: SimSuction::new(params),
            drive: SimDrive::new(params.trajectory_duration_s),
            feedback: SimFeedback::default(),
        }
    }

    /// Build a robot driving the simulated collaborators.
    pub fn robot(&self, arm_params: ArmCtrlParams, clock: Clock) -> Robot {
        Robot::new(
            ArmCtrl::new(Box::new(self.arm.clone()), arm_params),
            Box::new(self.suction.clone()),
            Box::new(self.drive.clone()),
            Box::new(self.feedback.clone()),
            clock,
        )
    }

    /// Advance every simulated part by `dt_s` seconds.
    pub fn step(&self, dt_s: f64) {
        self.arm.step(dt_s);
        self.suction.step(dt_s);
        self.drive.step(dt_s);
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::{ActionExt, Scheduler};
    use crate::auto::{AutoChooser, AutoParams};
    use crate::motions::{self, MotionParams};
    use hw_if::eqpt::Joint;
    use std::time::Duration;

    fn run(sim: &Sim, robot: &mut Robot, sched: &mut Scheduler, max_cycles: u32) -> bool {
        for _ in 0..max_cycles {
            robot.clock.advance();
            sim.step(robot.clock.period().as_secs_f64());
            robot.arm.cycle_start();
            sched.run_cycle(robot);
            if sched.is_empty() {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_move_to_medium_in_sim() {
        let sim = Sim::new(&SimParams::default());
        let mut robot = sim.robot(
            ArmCtrlParams::default(),
            Clock::new(Duration::from_millis(20)),
        );
        let mut sched = Scheduler::new();

        sched.schedule(
            motions::move_to_medium(&MotionParams::default(), 1.0).boxed(),
            &mut robot,
        );

        assert!(run(&sim, &mut robot, &mut sched, 500));
        assert!((robot.arm.position(Joint::Tilt) - 15.0).abs() < 1.0);
        assert!((robot.arm.position(Joint::Extension) - 12.0).abs() < 1.0);
    }

    #[test]
    fn test_auto_score_in_sim() {
        let sim = Sim::new(&SimParams::default());
        let arm_params = ArmCtrlParams {
            min_safe_tilt_in: 0.0,
            ..Default::default()
        };
        let mut robot = sim.robot(arm_params, Clock::new(Duration::from_millis(20)));
        let mut sched = Scheduler::new();

        let chooser = AutoChooser::new(MotionParams::default(), AutoParams::default()).unwrap();
        let auto = chooser.select("Wall Score Balance").unwrap().unwrap();
        sched.schedule(auto, &mut robot);

        // Auto speed is slow, allow well over an autonomous period
        assert!(run(&sim, &mut robot, &mut sched, 5000));
        assert!(!robot.suction.is_enabled());
        assert_eq!(sim.drive.num_started(), 2);
        assert!(robot.arm.position(Joint::Extension).abs() < 1.0);
    }

    #[test]
    fn test_auto_score_stalls_under_default_interlock() {
        let sim = Sim::new(&SimParams::default());
        let mut robot = sim.robot(
            ArmCtrlParams::default(),
            Clock::new(Duration::from_millis(20)),
        );
        let mut sched = Scheduler::new();

        let chooser = AutoChooser::new(MotionParams::default(), AutoParams::default()).unwrap();
        let auto = chooser.select_default().unwrap().unwrap();
        sched.schedule(auto, &mut robot);

        // Fifteen second autonomous period
        assert!(!run(&sim, &mut robot, &mut sched, 750));
        assert_eq!(sched.active_steps(), vec!["AutoScoreHigh/ExtendTo(5.10)"]);
        assert!(robot.arm.position(Joint::Extension).abs() < 1e-9);
    }
}
