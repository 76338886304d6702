//! Drivetrain actions used by the autonomous routines

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Trajectory;
use log::info;

use crate::{
    action::{Action, Requirements, Subsystem},
    robot::Robot,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Follow a pre-planned trajectory, finishing when the drivetrain reports it complete.
pub struct FollowTrajectory {
    name: String,
    trajectory: Trajectory,
    reset_pose: bool,
}

/// Set the current heading as zero. Finishes immediately.
pub struct ZeroHeading;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FollowTrajectory {
    /// If `reset_pose` is set odometry is reset to the start of the trajectory.
    pub fn new(trajectory: &Trajectory, reset_pose: bool) -> Self {
        Self {
            name: format!("Follow({})", trajectory.name),
            trajectory: trajectory.clone(),
            reset_pose,
        }
    }
}

impl Action for FollowTrajectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        Requirements::none().with(Subsystem::Drive)
    }

    fn initialize(&mut self, robot: &mut Robot) {
        info!(
            "Following trajectory \"{}\" (reset pose: {})",
            self.trajectory.name, self.reset_pose
        );
        robot
            .drive
            .start_trajectory(&self.trajectory, self.reset_pose);
    }

    fn is_finished(&self, robot: &Robot) -> bool {
        robot.drive.is_trajectory_complete()
    }

    fn end(&mut self, robot: &mut Robot, _interrupted: bool) {
        robot.drive.stop();
    }
}

impl Action for ZeroHeading {
    fn name(&self) -> &str {
        "ZeroHeading"
    }

    fn requirements(&self) -> Requirements {
        Requirements::none().with(Subsystem::Drive)
    }

    fn initialize(&mut self, robot: &mut Robot) {
        robot.drive.zero_heading();
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        true
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::TestRig;

    #[test]
    fn test_follow_trajectory() {
        let mut rig = TestRig::new(0.0, 0.0);
        let traj = Trajectory::new("Move Wall", 1.5, 1.5);
        let mut follow = FollowTrajectory::new(&traj, true);

        follow.initialize(&mut rig.robot);
        follow.execute(&mut rig.robot);
        assert!(!follow.is_finished(&rig.robot));

        rig.drive.set_complete(true);
        assert!(follow.is_finished(&rig.robot));
        follow.end(&mut rig.robot, false);

        let state = rig.drive.0.borrow();
        assert_eq!(state.started, vec![(String::from("Move Wall"), true)]);
        assert_eq!(state.num_stops, 1);
        assert_eq!(follow.name(), "Follow(Move Wall)");
    }

    #[test]
    fn test_zero_heading() {
        let mut rig = TestRig::new(0.0, 0.0);
        let mut zero = ZeroHeading;

        zero.initialize(&mut rig.robot);
        assert!(zero.is_finished(&rig.robot));
        assert_eq!(rig.drive.0.borrow().num_zero_heading, 1);
    }
}
