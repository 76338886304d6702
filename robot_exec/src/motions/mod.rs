//! # Composed motions
//!
//! Named arm routines built from the primitive actions. Each function builds a fresh instance, so
//! a binding or autonomous routine can create one every time it is activated.
//!
//! `speed` scales the output range of every closed loop step, 1.0 being full speed. Teleop uses
//! full speed, autonomous a reduced speed.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Joint;

use crate::action::{ActionExt, DriveJointToPosition, Sequential, SuctionCmd};

pub use params::MotionParams;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn tilt(speed: f64, target: f64) -> DriveJointToPosition {
    DriveJointToPosition::new(Joint::Tilt, speed, target)
}

fn extend(speed: f64, target: f64) -> DriveJointToPosition {
    DriveJointToPosition::new(Joint::Extension, speed, target)
}

/// Tilt up to the high position, then extend.
///
/// Neither step has a timeout, a stalled joint holds the motion until it is released.
pub fn move_to_high(p: &MotionParams, speed: f64) -> Sequential {
    Sequential::new(
        "MoveToHigh",
        vec![
            tilt(speed, p.high_tilt_in).boxed(),
            extend(speed, p.high_extension_in).boxed(),
        ],
    )
}

/// Retract, tilt, then extend to the medium position, each step with its own timeout.
pub fn move_to_medium(p: &MotionParams, speed: f64) -> Sequential {
    Sequential::new(
        "MoveToMedium",
        vec![
            extend(speed, p.retract_in)
                .with_timeout(p.medium_retract_timeout_s)
                .boxed(),
            tilt(speed, p.medium_tilt_in)
                .with_timeout(p.medium_tilt_timeout_s)
                .boxed(),
            extend(speed, p.medium_extension_in)
                .with_timeout(p.medium_extension_timeout_s)
                .boxed(),
        ],
    )
}

/// Retract, tilt, then extend to the low position, each step with its own timeout.
pub fn move_to_low(p: &MotionParams, speed: f64) -> Sequential {
    Sequential::new(
        "MoveToLow",
        vec![
            extend(speed, p.retract_in)
                .with_timeout(p.low_retract_timeout_s)
                .boxed(),
            tilt(speed, p.low_tilt_in)
                .with_timeout(p.low_tilt_timeout_s)
                .boxed(),
            extend(speed, p.low_extension_in)
                .with_timeout(p.low_extension_timeout_s)
                .boxed(),
        ],
    )
}

/// Tilt to the pickup position and start the suction.
pub fn move_to_pickup(p: &MotionParams, speed: f64) -> Sequential {
    Sequential::new(
        "MoveToPickup",
        vec![
            tilt(speed, p.pickup_tilt_in)
                .with_timeout(p.tilt_timeout_s)
                .boxed(),
            SuctionCmd::enable().boxed(),
        ],
    )
}

/// Move to the high position and drop the tilt to release the piece.
pub fn score_high(p: &MotionParams, speed: f64) -> Sequential {
    Sequential::new(
        "ScoreHigh",
        vec![
            move_to_high(p, speed).boxed(),
            tilt(speed, p.high_score_tilt_in).boxed(),
        ],
    )
}

/// Move to the medium position and drop the tilt, at reduced speed, to release the piece.
pub fn score_medium(p: &MotionParams, speed: f64) -> Sequential {
    Sequential::new(
        "ScoreMedium",
        vec![
            move_to_medium(p, speed).boxed(),
            tilt(speed * p.medium_score_speed_factor, p.medium_score_tilt_in)
                .with_timeout(p.tilt_timeout_s)
                .boxed(),
        ],
    )
}

/// Retract fully, then tilt down to the stowed position.
pub fn reset_arm(p: &MotionParams, speed: f64) -> Sequential {
    Sequential::new(
        "ResetArm",
        vec![
            extend(speed, p.retract_in)
                .with_timeout(p.reset_retract_timeout_s)
                .boxed(),
            tilt(speed, p.stow_tilt_in)
                .with_timeout(p.reset_tilt_timeout_s)
                .boxed(),
        ],
    )
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::{Action, Scheduler, Subsystem};
    use crate::arm_ctrl::ArmCtrlParams;
    use crate::test_util::{PortCmd, TestRig};

    /// Run the motion to completion with a stalled arm, returning each distinct position target
    /// in the order issued, with the time it was first issued.
    fn targets_over_time(
        rig: &mut TestRig,
        motion: Sequential,
        max_cycles: u32,
    ) -> (Vec<(f64, Joint, f64, f64)>, f64) {
        let mut sched = Scheduler::new();
        sched.schedule(motion.boxed(), &mut rig.robot);

        let mut targets: Vec<(f64, Joint, f64, f64)> = Vec::new();

        for _ in 0..max_cycles {
            sched.run_cycle(&mut rig.robot);
            let now = rig.robot.clock.elapsed_s();

            for cmd in rig.port.take_cmds() {
                if let PortCmd::Target(joint, target, scale) = cmd {
                    let is_new = match targets.last() {
                        Some((_, j, t, _)) => *j != joint || *t != target,
                        None => true,
                    };
                    if is_new {
                        targets.push((now, joint, target, scale));
                    }
                }
            }

            if sched.is_empty() {
                return (targets, now);
            }
            rig.tick();
        }

        panic!("Motion did not finish in {} cycles", max_cycles);
    }

    /// Arm parameters under which the interlock never vetoes a stalled arm at zero tilt, however
    /// far it is extended.
    fn permissive() -> ArmCtrlParams {
        ArmCtrlParams {
            min_safe_tilt_in: -1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_to_medium_literal_order() {
        let mut rig = TestRig::with_params(20.0, 0.0, permissive());
        let p = MotionParams::default();

        let (targets, end_s) = targets_over_time(&mut rig, move_to_medium(&p, 1.0), 500);

        assert_eq!(
            targets,
            vec![
                (0.0, Joint::Extension, 0.0, 1.0),
                (1.0, Joint::Tilt, 15.0, 1.0),
                (2.5, Joint::Extension, 12.0, 1.0),
            ]
        );
        assert_eq!(end_s, 3.5);
    }

    #[test]
    fn test_move_to_high_stalls_without_timeout() {
        let mut rig = TestRig::new(0.0, 0.0);
        let p = MotionParams::default();
        let mut sched = Scheduler::new();

        sched.schedule(move_to_high(&p, 1.0).boxed(), &mut rig.robot);
        for _ in 0..1000 {
            sched.run_cycle(&mut rig.robot);
            rig.tick();
        }

        assert_eq!(sched.active_steps(), vec!["MoveToHigh/TiltTo(16.50)"]);
    }

    #[test]
    fn test_move_to_high_and_score() {
        let mut rig = TestRig::new(0.0, 0.0);
        let p = MotionParams::default();
        let mut score = score_high(&p, 1.0);

        score.initialize(&mut rig.robot);
        score.execute(&mut rig.robot);
        assert_eq!(rig.port.take_cmds(), vec![PortCmd::Target(Joint::Tilt, 16.5, 1.0)]);

        // Tilt arrives, extension starts in the same cycle
        rig.port.set_position(Joint::Tilt, 16.4);
        score.execute(&mut rig.robot);
        assert_eq!(
            rig.port.take_cmds(),
            vec![
                PortCmd::Target(Joint::Tilt, 16.5, 1.0),
                PortCmd::Speed(Joint::Tilt, 0.0),
                PortCmd::Target(Joint::Extension, 27.5, 1.0)
            ]
        );

        rig.port.set_position(Joint::Extension, 27.5);
        score.execute(&mut rig.robot);
        assert_eq!(score.active_step(), "ScoreHigh/TiltTo(14.50)");
        assert!(rig
            .port
            .take_cmds()
            .contains(&PortCmd::Target(Joint::Tilt, 14.5, 1.0)));

        rig.port.set_position(Joint::Tilt, 14.5);
        score.execute(&mut rig.robot);
        assert!(score.is_finished(&rig.robot));
    }

    #[test]
    fn test_score_medium_halves_release_speed() {
        let mut rig = TestRig::with_params(20.0, 0.0, permissive());
        let p = MotionParams::default();

        let (targets, end_s) = targets_over_time(&mut rig, score_medium(&p, 1.0), 500);

        assert_eq!(targets.last(), Some(&(3.5, Joint::Tilt, 11.5, 0.5)));
        assert_eq!(end_s, 5.0);
    }

    #[test]
    fn test_move_to_pickup_enables_suction() {
        let mut rig = TestRig::new(0.0, 0.0);
        let p = MotionParams::default();

        let (targets, end_s) = targets_over_time(&mut rig, move_to_pickup(&p, 1.0), 500);

        assert_eq!(targets, vec![(0.0, Joint::Tilt, 12.6, 1.0)]);
        assert_eq!(end_s, 1.5);
        assert!(rig.suction.enabled());
    }

    #[test]
    fn test_move_to_low_and_reset() {
        let mut rig = TestRig::with_params(20.0, 0.0, permissive());
        let p = MotionParams::default();

        let (targets, _) = targets_over_time(&mut rig, move_to_low(&p, 1.0), 500);
        assert_eq!(
            targets.iter().map(|t| (t.1, t.2)).collect::<Vec<_>>(),
            vec![
                (Joint::Extension, 0.0),
                (Joint::Tilt, 10.0),
                (Joint::Extension, 6.0)
            ]
        );

        let reset = reset_arm(&p, 0.15);
        assert!(reset.requirements().contains(Subsystem::ArmExtension));
        assert!(reset.requirements().contains(Subsystem::ArmTilt));
        assert!(!reset.requirements().contains(Subsystem::Suction));
    }
}
