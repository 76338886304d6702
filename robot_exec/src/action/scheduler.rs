//! # Action scheduler
//!
//! The scheduler holds every active top-level action and drives their lifecycle once per control
//! cycle. It is also the only mutual exclusion mechanism: an action may only be activated once
//! every older action requiring any of the same subsystems has been interrupted, so each joint
//! has a single writer in any cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{Action, Requirements};
use crate::robot::Robot;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Handle on a scheduled action.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ActionId(u64);

#[derive(Default)]
pub struct Scheduler {
    /// Active actions in activation order
    active: Vec<Scheduled>,

    next_id: u64,
}

struct Scheduled {
    id: ActionId,
    requirements: Requirements,
    action: Box<dyn Action>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate an action.
    ///
    /// Any active action whose requirements intersect the new action's is interrupted first. The
    /// new action is then initialised and will be executed on the next call to `run_cycle`.
    pub fn schedule(&mut self, mut action: Box<dyn Action>, robot: &mut Robot) -> ActionId {
        let requirements = action.requirements();

        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].requirements.intersects(&requirements) {
                let mut old = self.active.remove(i);
                info!(
                    "{} interrupted by {} (conflicting requirements {})",
                    old.action.name(),
                    action.name(),
                    requirements
                );
                old.action.end(robot, true);
            } else {
                i += 1;
            }
        }

        let id = ActionId(self.next_id);
        self.next_id += 1;

        info!("Scheduled {} as {}", action.name(), id);
        action.initialize(robot);

        self.active.push(Scheduled {
            id,
            requirements,
            action,
        });

        id
    }

    /// Execute every active action once, in activation order, ending those which finish.
    pub fn run_cycle(&mut self, robot: &mut Robot) {
        let mut i = 0;
        while i < self.active.len() {
            let s = &mut self.active[i];
            s.action.execute(robot);

            if s.action.is_finished(robot) {
                let mut done = self.active.remove(i);
                done.action.end(robot, false);
                info!("{} ({}) finished", done.action.name(), done.id);
            } else {
                i += 1;
            }
        }
    }

    /// Interrupt the action with the given id.
    ///
    /// Returns `false` if the action is no longer active.
    pub fn cancel(&mut self, id: ActionId, robot: &mut Robot) -> bool {
        match self.active.iter().position(|s| s.id == id) {
            Some(i) => {
                let mut s = self.active.remove(i);
                info!("{} ({}) cancelled", s.action.name(), id);
                s.action.end(robot, true);
                true
            }
            None => {
                debug!("Cancel of {} ignored, not active", id);
                false
            }
        }
    }

    /// Interrupt every active action, oldest first.
    pub fn cancel_all(&mut self, robot: &mut Robot) {
        if !self.active.is_empty() {
            info!("Cancelling {} active action(s)", self.active.len());
        }

        for mut s in self.active.drain(..) {
            s.action.end(robot, true);
        }
    }

    pub fn is_scheduled(&self, id: ActionId) -> bool {
        self.active.iter().any(|s| s.id == id)
    }

    /// The active step of every active action, in activation order.
    pub fn active_steps(&self) -> Vec<String> {
        self.active.iter().map(|s| s.action.active_step()).collect()
    }

    /// Union of the requirements of all active actions.
    pub fn requirements(&self) -> Requirements {
        self.active
            .iter()
            .fold(Requirements::none(), |r, s| r.union(s.requirements))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::{ActionExt, Subsystem};
    use crate::test_util::{Probe, TestRig};

    fn reqs(s: &[Subsystem]) -> Requirements {
        Requirements::of(s)
    }

    #[test]
    fn test_conflict_interrupts_older() {
        let mut rig = TestRig::new(0.0, 0.0);
        let mut sched = Scheduler::new();

        let (tilt, tilt_counts) = Probe::with_requirements("Tilt", reqs(&[Subsystem::ArmTilt]));
        let (drive, drive_counts) = Probe::with_requirements("Drive", reqs(&[Subsystem::Drive]));
        let (arm, arm_counts) = Probe::with_requirements(
            "Arm",
            reqs(&[Subsystem::ArmTilt, Subsystem::ArmExtension]),
        );

        let tilt_id = sched.schedule(tilt.boxed(), &mut rig.robot);
        let drive_id = sched.schedule(drive.boxed(), &mut rig.robot);
        sched.run_cycle(&mut rig.robot);

        let arm_id = sched.schedule(arm.boxed(), &mut rig.robot);

        assert!(!sched.is_scheduled(tilt_id));
        assert!(sched.is_scheduled(drive_id));
        assert!(sched.is_scheduled(arm_id));
        assert_eq!(tilt_counts.ends(), (0, 1));
        assert_eq!(drive_counts.ends(), (0, 0));
        assert_eq!(arm_counts.init(), 1);
        assert_eq!(sched.active_steps(), vec!["Drive", "Arm"]);
        assert!(sched.requirements().contains(Subsystem::ArmExtension));
    }

    #[test]
    fn test_run_cycle_order_and_finish() {
        let mut rig = TestRig::new(0.0, 0.0);
        let mut sched = Scheduler::new();

        let (a, a_counts) = Probe::finishing_after("A", 2);
        let (b, b_counts) = Probe::never_finishing("B");

        sched.schedule(a.boxed(), &mut rig.robot);
        sched.schedule(b.boxed(), &mut rig.robot);

        sched.run_cycle(&mut rig.robot);
        assert_eq!(sched.len(), 2);
        sched.run_cycle(&mut rig.robot);
        assert_eq!(sched.len(), 1);
        assert_eq!(a_counts.ends(), (1, 0));

        sched.run_cycle(&mut rig.robot);
        assert_eq!(a_counts.exec(), 2);
        assert_eq!(b_counts.exec(), 3);

        // Activation order is the execution order
        assert!(a_counts.first_exec_seq() < b_counts.first_exec_seq());
    }

    #[test]
    fn test_cancel_ends_exactly_once() {
        let mut rig = TestRig::new(0.0, 0.0);
        let mut sched = Scheduler::new();

        let (a, a_counts) = Probe::never_finishing("A");
        let (b, b_counts) = Probe::never_finishing("B");
        let a_id = sched.schedule(a.boxed(), &mut rig.robot);
        sched.schedule(b.boxed(), &mut rig.robot);

        assert!(sched.cancel(a_id, &mut rig.robot));
        assert!(!sched.cancel(a_id, &mut rig.robot));
        assert_eq!(a_counts.ends(), (0, 1));

        sched.cancel_all(&mut rig.robot);
        sched.cancel_all(&mut rig.robot);
        assert_eq!(b_counts.ends(), (0, 1));
        assert!(sched.is_empty());
    }

    #[test]
    fn test_no_requirements_never_conflict() {
        let mut rig = TestRig::new(0.0, 0.0);
        let mut sched = Scheduler::new();

        let (a, _) = Probe::never_finishing("A");
        let (b, _) = Probe::never_finishing("B");
        let a_id = sched.schedule(a.boxed(), &mut rig.robot);
        let b_id = sched.schedule(b.boxed(), &mut rig.robot);

        assert!(sched.is_scheduled(a_id));
        assert!(sched.is_scheduled(b_id));
        assert_ne!(a_id, b_id);
    }
}
