//! # Arm telemetry
//!
//! One [`ArmTm`] frame is built at the end of every cycle. It is the whole of the introspection
//! surface of the robot: vetoed demands, timed out steps and stalled waits only show up here.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Joint;
use serde::Serialize;

use crate::{
    action::Scheduler,
    robot::{Robot, RobotMode},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Telemetry frame. Flat so it can be archived as a CSV row.
#[derive(Debug, Clone, Serialize)]
pub struct ArmTm {
    /// Elapsed time of the cycle clock
    pub time_s: f64,

    pub mode: RobotMode,

    pub extension_in: f64,
    pub tilt_in: f64,

    pub extend_safe: bool,
    pub tilt_safe: bool,

    /// True if a demand on the joint was vetoed this cycle
    pub extension_vetoed: bool,
    pub tilt_vetoed: bool,

    pub suction_enabled: bool,
    pub vacuum_seal: bool,
    pub min_vacuum: bool,

    /// Active step of every scheduled action, separated by `;`
    pub active_steps: String,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ArmTm {
    /// Build the frame for the cycle that has just been processed.
    pub fn from_robot(robot: &Robot, scheduler: &Scheduler) -> Self {
        let report = robot.arm.report();

        Self {
            time_s: robot.clock.elapsed_s(),
            mode: robot.mode,
            extension_in: robot.arm.position(Joint::Extension),
            tilt_in: robot.arm.position(Joint::Tilt),
            extend_safe: robot.arm.is_extend_safe(),
            tilt_safe: robot.arm.is_tilt_safe(),
            extension_vetoed: report.extension_vetoed,
            tilt_vetoed: report.tilt_vetoed,
            suction_enabled: robot.suction.is_enabled(),
            vacuum_seal: robot.suction.has_vacuum_seal(),
            min_vacuum: robot.suction.has_min_vacuum(),
            active_steps: scheduler.active_steps().join(";"),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::{ActionExt, RunJointAtSpeed, WaitForDuration};
    use crate::test_util::TestRig;

    #[test]
    fn test_tm_frame() {
        let mut rig = TestRig::new(4.0, 2.0);
        let mut sched = Scheduler::new();

        sched.schedule(
            RunJointAtSpeed::new(Joint::Extension, |_| 0.5).boxed(),
            &mut rig.robot,
        );
        sched.schedule(WaitForDuration::new(3.0).boxed(), &mut rig.robot);
        rig.tick();
        sched.run_cycle(&mut rig.robot);

        let tm = ArmTm::from_robot(&rig.robot, &sched);

        assert_eq!(tm.time_s, 0.02);
        assert_eq!(tm.mode, RobotMode::Disabled);
        assert_eq!(tm.extension_in, 4.0);
        assert_eq!(tm.tilt_in, 2.0);
        assert!(!tm.extend_safe);
        assert!(!tm.tilt_safe);
        assert!(tm.extension_vetoed);
        assert!(!tm.tilt_vetoed);
        assert_eq!(tm.active_steps, "RunExtension;Wait(3.00s)");
    }
}
