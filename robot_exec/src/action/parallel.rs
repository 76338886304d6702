//! # Parallel action group

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;

use super::{union_requirements, Action, Requirements};
use crate::robot::Robot;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// When a [`Parallel`] group counts as finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Finished once every child has finished.
    AllFinish,

    /// Finished as soon as any child finishes, the others being interrupted.
    AnyFinishes,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Runs all of its children concurrently.
pub struct Parallel {
    name: String,
    policy: ParallelPolicy,
    children: Vec<Box<dyn Action>>,
    requirements: Requirements,

    /// Which children have been initialised and not yet ended
    running: Vec<bool>,

    /// Set once any child has finished on its own
    any_finished: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Parallel {
    pub fn new(name: &str, policy: ParallelPolicy, children: Vec<Box<dyn Action>>) -> Self {
        let requirements = union_requirements(&children);
        let running = vec![false; children.len()];
        Self {
            name: String::from(name),
            policy,
            children,
            requirements,
            running,
            any_finished: false,
        }
    }

    /// Group which finishes once every child has finished.
    pub fn all(name: &str, children: Vec<Box<dyn Action>>) -> Self {
        Self::new(name, ParallelPolicy::AllFinish, children)
    }

    /// Group which finishes as soon as one child finishes.
    pub fn race(name: &str, children: Vec<Box<dyn Action>>) -> Self {
        Self::new(name, ParallelPolicy::AnyFinishes, children)
    }

    fn end_running(&mut self, robot: &mut Robot) {
        for (child, running) in self.children.iter_mut().zip(self.running.iter_mut()) {
            if *running {
                child.end(robot, true);
                *running = false;
            }
        }
    }
}

impl Action for Parallel {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self, robot: &mut Robot) {
        self.any_finished = false;
        for (child, running) in self.children.iter_mut().zip(self.running.iter_mut()) {
            child.initialize(robot);
            *running = true;
        }
    }

    fn execute(&mut self, robot: &mut Robot) {
        for (child, running) in self.children.iter_mut().zip(self.running.iter_mut()) {
            if !*running {
                continue;
            }

            child.execute(robot);

            if child.is_finished(robot) {
                child.end(robot, false);
                *running = false;
                self.any_finished = true;
                debug!("{}: {} complete", self.name, child.name());
            }
        }

        if self.policy == ParallelPolicy::AnyFinishes && self.any_finished {
            self.end_running(robot);
        }
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        let none_running = self.running.iter().all(|r| !r);
        match self.policy {
            ParallelPolicy::AllFinish => none_running,
            ParallelPolicy::AnyFinishes => self.any_finished || none_running,
        }
    }

    fn end(&mut self, robot: &mut Robot, _interrupted: bool) {
        self.end_running(robot);
    }

    fn active_step(&self) -> String {
        let steps: Vec<String> = self
            .children
            .iter()
            .zip(self.running.iter())
            .filter(|(_, r)| **r)
            .map(|(c, _)| c.active_step())
            .collect();

        if steps.is_empty() {
            self.name.clone()
        } else {
            format!("{}[{}]", self.name, steps.join("|"))
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
