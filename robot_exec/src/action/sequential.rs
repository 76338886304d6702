//! # Sequential action group

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;

use super::{union_requirements, Action, Requirements};
use crate::robot::Robot;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Runs its children one after another, with at most one child active at a time.
///
/// When a child finishes the next is initialised and executed in the same cycle, so a chain of
/// immediately finishing children costs no extra cycles.
pub struct Sequential {
    name: String,
    children: Vec<Box<dyn Action>>,
    requirements: Requirements,

    /// Index of the active child, equal to the number of children once all are consumed
    index: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Sequential {
    pub fn new(name: &str, children: Vec<Box<dyn Action>>) -> Self {
        let requirements = union_requirements(&children);
        Self {
            name: String::from(name),
            index: children.len(),
            children,
            requirements,
        }
    }

    /// Append another child to the end of the sequence.
    ///
    /// Only valid before the group is activated.
    pub fn then(mut self, child: Box<dyn Action>) -> Self {
        self.requirements = self.requirements.union(child.requirements());
        self.children.push(child);
        self.index = self.children.len();
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Action for Sequential {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self, robot: &mut Robot) {
        self.index = 0;
        if let Some(first) = self.children.first_mut() {
            first.initialize(robot);
        }
    }

    fn execute(&mut self, robot: &mut Robot) {
        if self.index >= self.children.len() {
            return;
        }

        self.children[self.index].execute(robot);

        while self.index < self.children.len() && self.children[self.index].is_finished(robot) {
            self.children[self.index].end(robot, false);
            debug!("{}: {} complete", self.name, self.children[self.index].name());

            self.index += 1;

            if let Some(next) = self.children.get_mut(self.index) {
                next.initialize(robot);
                next.execute(robot);
            }
        }
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        self.index >= self.children.len()
    }

    fn end(&mut self, robot: &mut Robot, interrupted: bool) {
        if let Some(active) = self.children.get_mut(self.index) {
            active.end(robot, interrupted);
        }
        self.index = self.children.len();
    }

    fn active_step(&self) -> String {
        match self.children.get(self.index) {
            Some(c) => format!("{}/{}", self.name, c.active_step()),
            None => self.name.clone(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::{ActionExt, SuctionCmd, WaitUntil};
    use crate::test_util::{Probe, TestRig};

    #[test]
    fn test_no_stall_on_finished_child() {
        let mut rig = TestRig::new(0.0, 0.0);
        let (a, a_counts) = Probe::finishing_after("A", 1);
        let (b, b_counts) = Probe::finishing_after("B", 3);

        let mut seq = Sequential::new("Seq", vec![a.boxed(), b.boxed()]);

        seq.initialize(&mut rig.robot);
        assert_eq!(a_counts.init(), 1);
        assert_eq!(b_counts.init(), 0);

        // A finishes on its first execute, B starts in the same call
        seq.execute(&mut rig.robot);
        assert_eq!(a_counts.ends(), (1, 0));
        assert_eq!(b_counts.init(), 1);
        assert_eq!(b_counts.exec(), 1);
        assert_eq!(seq.active_step(), "Seq/B");

        seq.execute(&mut rig.robot);
        assert!(!seq.is_finished(&rig.robot));
        seq.execute(&mut rig.robot);
        assert!(seq.is_finished(&rig.robot));
        assert_eq!(b_counts.ends(), (1, 0));

        // The owner ends the finished group, which must not end any child again
        seq.end(&mut rig.robot, false);
        assert_eq!(a_counts.ends(), (1, 0));
        assert_eq!(b_counts.ends(), (1, 0));
    }

    #[test]
    fn test_chain_of_instant_children() {
        let mut rig = TestRig::new(0.0, 0.0);
        let (a, a_counts) = Probe::finishing_after("A", 1);
        let (b, b_counts) = Probe::finishing_after("B", 1);
        let (c, c_counts) = Probe::never_finishing("C");

        let mut seq = Sequential::new("Seq", vec![a.boxed(), b.boxed(), c.boxed()]);
        seq.initialize(&mut rig.robot);
        seq.execute(&mut rig.robot);

        assert_eq!(a_counts.ends(), (1, 0));
        assert_eq!(b_counts.ends(), (1, 0));
        assert_eq!(c_counts.init(), 1);
        assert_eq!(c_counts.exec(), 1);
        assert_eq!(seq.active_step(), "Seq/C");
    }

    #[test]
    fn test_interrupt_ends_active_child_only() {
        let mut rig = TestRig::new(0.0, 0.0);
        let (a, a_counts) = Probe::finishing_after("A", 1);
        let (b, b_counts) = Probe::never_finishing("B");
        let (c, c_counts) = Probe::never_finishing("C");

        let mut seq = Sequential::new("Seq", vec![a.boxed(), b.boxed(), c.boxed()]);
        seq.initialize(&mut rig.robot);
        seq.execute(&mut rig.robot);
        seq.execute(&mut rig.robot);

        seq.end(&mut rig.robot, true);
        seq.end(&mut rig.robot, true);

        assert_eq!(a_counts.ends(), (1, 0));
        assert_eq!(b_counts.ends(), (0, 1));
        assert_eq!(c_counts.init(), 0);
        assert_eq!(c_counts.ends(), (0, 0));
    }

    #[test]
    fn test_empty() {
        let mut rig = TestRig::new(0.0, 0.0);
        let mut seq = Sequential::new("Empty", vec![]);

        seq.initialize(&mut rig.robot);
        seq.execute(&mut rig.robot);
        assert!(seq.is_finished(&rig.robot));
        assert!(seq.is_empty());
    }

    #[test]
    fn test_wait_until_seal_holds_for_exactly_500_ticks() {
        let mut rig = TestRig::new(0.0, 0.0);
        let (after, after_counts) = Probe::never_finishing("AfterSeal");

        let mut seq = Sequential::new(
            "Pickup",
            vec![
                SuctionCmd::enable().boxed(),
                WaitUntil::new("seal", |r| r.suction.has_vacuum_seal()).boxed(),
                after.boxed(),
            ],
        );

        seq.initialize(&mut rig.robot);

        for tick in 1..=500 {
            rig.tick();
            seq.execute(&mut rig.robot);
            assert_eq!(seq.active_step(), "Pickup/WaitUntil(seal)", "tick {}", tick);
            assert_eq!(after_counts.init(), 0);
        }
        assert!(rig.suction.enabled());

        rig.suction.set_seal(true);
        rig.tick();
        seq.execute(&mut rig.robot);

        assert_eq!(seq.active_step(), "Pickup/AfterSeal");
        assert_eq!(after_counts.init(), 1);
        assert_eq!(after_counts.exec(), 1);
    }

    #[test]
    fn test_requirements_union() {
        let (a, _) = Probe::with_requirements(
            "A",
            Requirements::none().with(crate::action::Subsystem::ArmTilt),
        );
        let seq = Sequential::new("Seq", vec![a.boxed()]).then(SuctionCmd::enable().boxed());

        assert!(seq.requirements().contains(crate::action::Subsystem::ArmTilt));
        assert!(seq.requirements().contains(crate::action::Subsystem::Suction));
        assert_eq!(seq.len(), 2);
    }
}
