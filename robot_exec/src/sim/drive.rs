//! Simulated drivetrain

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::{Drivetrain, Trajectory};
use log::debug;
use std::{cell::RefCell, rc::Rc};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drivetrain which completes every trajectory after a fixed time.
#[derive(Clone)]
pub struct SimDrive(Rc<RefCell<SimDriveState>>);

#[derive(Default)]
struct SimDriveState {
    duration_s: f64,

    /// Time spent on the current trajectory, `None` when not following one
    follow_time_s: Option<f64>,
    complete: bool,
    num_started: u32,
    num_zero_heading: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimDrive {
    pub fn new(duration_s: f64) -> Self {
        Self(Rc::new(RefCell::new(SimDriveState {
            duration_s,
            ..Default::default()
        })))
    }

    pub fn step(&self, dt_s: f64) {
        let mut state = self.0.borrow_mut();
        let duration_s = state.duration_s;

        let done = match state.follow_time_s.as_mut() {
            Some(t) => {
                *t += dt_s;
                *t >= duration_s
            }
            None => false,
        };

        if done {
            state.follow_time_s = None;
            state.complete = true;
        }
    }

    /// Number of trajectories started so far.
    pub fn num_started(&self) -> u32 {
        self.0.borrow().num_started
    }

    pub fn num_zero_heading(&self) -> u32 {
        self.0.borrow().num_zero_heading
    }
}

impl Drivetrain for SimDrive {
    fn start_trajectory(&mut self, trajectory: &Trajectory, reset_pose: bool) {
        debug!(
            "Sim drive following \"{}\" (max {:.1} m/s, {:.1} m/s^2, reset pose: {})",
            trajectory.name, trajectory.max_vel_ms, trajectory.max_accel_mss, reset_pose
        );

        let mut state = self.0.borrow_mut();
        state.follow_time_s = Some(0.0);
        state.complete = false;
        state.num_started += 1;
    }

    fn is_trajectory_complete(&self) -> bool {
        self.0.borrow().complete
    }

    fn stop(&mut self) {
        self.0.borrow_mut().follow_time_s = None;
    }

    fn zero_heading(&mut self) {
        self.0.borrow_mut().num_zero_heading += 1;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_trajectory_completes() {
        let mut drive = SimDrive::new(1.0);
        let traj = Trajectory::new("Move Wall", 1.5, 1.5);

        drive.start_trajectory(&traj, true);
        drive.step(0.5);
        assert!(!drive.is_trajectory_complete());
        drive.step(0.5);
        assert!(drive.is_trajectory_complete());

        // Stopped part way, never completes
        drive.start_trajectory(&traj, false);
        drive.step(0.5);
        drive.stop();
        drive.step(1.0);
        assert!(!drive.is_trajectory_complete());
        assert_eq!(drive.num_started(), 2);

        drive.zero_heading();
        assert_eq!(drive.num_zero_heading(), 1);
    }
}
