//! # Timeout wrapper

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;
use util::time::Timer;

use super::{Action, Requirements};
use crate::robot::Robot;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TimeoutState {
    /// Child is running
    Running,

    /// Child finished on its own and has been ended
    ChildFinished,

    /// Deadline passed and the child has been ended as interrupted
    TimedOut,

    /// The wrapper itself was ended
    Ended,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Wraps a child, interrupting it if it has not finished within a deadline.
///
/// A timeout is the normal way for a step to give up on a stalled joint. The wrapper itself
/// finishes normally when its child times out, so an enclosing sequence moves on.
pub struct WithTimeout {
    name: String,
    child: Box<dyn Action>,
    timeout_s: f64,
    timer: Timer,
    state: TimeoutState,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WithTimeout {
    pub fn new(child: Box<dyn Action>, timeout_s: f64) -> Self {
        Self {
            name: format!("{}<{:.2}s>", child.name(), timeout_s),
            child,
            timeout_s,
            timer: Timer::default(),
            state: TimeoutState::Ended,
        }
    }

    /// True if the child was interrupted by the deadline.
    pub fn timed_out(&self) -> bool {
        self.state == TimeoutState::TimedOut
    }

    pub fn timeout_s(&self) -> f64 {
        self.timeout_s
    }
}

impl Action for WithTimeout {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.child.requirements()
    }

    fn initialize(&mut self, robot: &mut Robot) {
        self.timer.start(&robot.clock);
        self.state = TimeoutState::Running;
        self.child.initialize(robot);
    }

    fn execute(&mut self, robot: &mut Robot) {
        if self.state != TimeoutState::Running {
            return;
        }

        self.child.execute(robot);

        if self.child.is_finished(robot) {
            self.child.end(robot, false);
            self.state = TimeoutState::ChildFinished;
        } else if self.timer.has_elapsed(&robot.clock, self.timeout_s) {
            info!(
                "{} timed out after {:.2} s",
                self.child.name(),
                self.timeout_s
            );
            self.child.end(robot, true);
            self.state = TimeoutState::TimedOut;
        }
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        self.state != TimeoutState::Running
    }

    fn end(&mut self, robot: &mut Robot, _interrupted: bool) {
        if self.state == TimeoutState::Running {
            self.child.end(robot, true);
            self.state = TimeoutState::Ended;
        }
        self.timer.stop();
    }

    fn active_step(&self) -> String {
        self.child.active_step()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::ActionExt;
    use crate::test_util::{Probe, TestRig};

    #[test]
    fn test_timeout_fires() {
        let mut rig = TestRig::new(0.0, 0.0);
        let (child, counts) = Probe::never_finishing("Stalled");
        let mut wt = child.with_timeout(1.0);

        wt.initialize(&mut rig.robot);
        wt.execute(&mut rig.robot);

        // 20 ms cycles, the deadline is reached on the 50th cycle after activation
        for _ in 0..49 {
            rig.tick();
            wt.execute(&mut rig.robot);
            assert!(!wt.is_finished(&rig.robot));
        }
        rig.tick();
        wt.execute(&mut rig.robot);

        assert!(wt.is_finished(&rig.robot));
        assert!(wt.timed_out());
        assert_eq!(counts.ends(), (0, 1));

        // The owner ends the finished wrapper, the child must not be ended again
        wt.end(&mut rig.robot, false);
        assert_eq!(counts.ends(), (0, 1));
        assert_eq!(counts.exec(), 51);
    }

    #[test]
    fn test_child_finishes_first() {
        let mut rig = TestRig::new(0.0, 0.0);
        let (child, counts) = Probe::finishing_after("Quick", 3);
        let mut wt = child.with_timeout(1.0);

        wt.initialize(&mut rig.robot);
        for _ in 0..3 {
            rig.tick();
            wt.execute(&mut rig.robot);
        }

        assert!(wt.is_finished(&rig.robot));
        assert!(!wt.timed_out());
        assert_eq!(counts.ends(), (1, 0));
    }

    #[test]
    fn test_interrupted_wrapper_interrupts_child_once() {
        let mut rig = TestRig::new(0.0, 0.0);
        let (child, counts) = Probe::never_finishing("Stalled");
        let mut wt = child.with_timeout(1.0);

        wt.initialize(&mut rig.robot);
        wt.execute(&mut rig.robot);
        wt.end(&mut rig.robot, true);
        wt.end(&mut rig.robot, true);

        assert_eq!(counts.ends(), (0, 1));
        assert_eq!(wt.name(), "Stalled<1.00s>");
    }
}
