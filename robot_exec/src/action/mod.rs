//! # Action model
//!
//! An action is one unit of schedulable robot behaviour. Its lifecycle is driven by the
//! [`Scheduler`](scheduler::Scheduler) (or by the group that owns it), once per control cycle:
//!
//! - `initialize` once on activation,
//! - `execute` every cycle while active,
//! - `is_finished` after every `execute`,
//! - `end` exactly once on deactivation, with `interrupted` set if the action did not finish on its
//!   own.
//!
//! None of these calls block or fail. Waiting is expressed by `is_finished` returning `false` over
//! many cycles.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod parallel;
pub mod primitives;
pub mod scheduler;
mod sequential;
mod timeout;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Joint;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::robot::Robot;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use parallel::{Parallel, ParallelPolicy};
pub use primitives::*;
pub use scheduler::{ActionId, Scheduler};
pub use sequential::Sequential;
pub use timeout::WithTimeout;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A resource which at most one active action may use at a time.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Subsystem {
    ArmExtension,
    ArmTilt,
    Suction,
    Drive,
    Feedback,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Set of subsystems an action requires exclusively for its whole active lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Requirements(u8);

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

pub trait Action {
    /// Name of the action, used in logs and telemetry.
    fn name(&self) -> &str;

    /// Subsystems required by this action.
    fn requirements(&self) -> Requirements {
        Requirements::none()
    }

    /// Called once when the action is activated.
    fn initialize(&mut self, _robot: &mut Robot) {}

    /// Called once per cycle while the action is active.
    fn execute(&mut self, _robot: &mut Robot) {}

    /// True once the action has completed.
    fn is_finished(&self, robot: &Robot) -> bool;

    /// Called once when the action is deactivated.
    fn end(&mut self, _robot: &mut Robot, _interrupted: bool) {}

    /// Description of the step currently being performed.
    ///
    /// For a group this includes the steps of its active children.
    fn active_step(&self) -> String {
        self.name().to_string()
    }
}

/// Combinator helpers available on every action.
pub trait ActionExt: Action + Sized + 'static {
    /// End the action, as interrupted, if it has not finished after `timeout_s` seconds.
    fn with_timeout(self, timeout_s: f64) -> WithTimeout {
        WithTimeout::new(Box::new(self), timeout_s)
    }

    fn boxed(self) -> Box<dyn Action> {
        Box::new(self)
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<A: Action + 'static> ActionExt for A {}

impl Subsystem {
    pub const ALL: [Subsystem; 5] = [
        Subsystem::ArmExtension,
        Subsystem::ArmTilt,
        Subsystem::Suction,
        Subsystem::Drive,
        Subsystem::Feedback,
    ];

    fn bit(self) -> u8 {
        1u8 << (self as u8)
    }
}

impl From<Joint> for Subsystem {
    fn from(joint: Joint) -> Self {
        match joint {
            Joint::Extension => Subsystem::ArmExtension,
            Joint::Tilt => Subsystem::ArmTilt,
        }
    }
}

impl Requirements {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn of(subsystems: &[Subsystem]) -> Self {
        subsystems.iter().fold(Self::none(), |r, s| r.with(*s))
    }

    pub fn with(self, subsystem: Subsystem) -> Self {
        Self(self.0 | subsystem.bit())
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(&self, subsystem: Subsystem) -> bool {
        self.0 & subsystem.bit() != 0
    }

    /// True if any subsystem is required by both sets.
    pub fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Subsystem> + '_ {
        Subsystem::ALL.iter().copied().filter(move |s| self.contains(*s))
    }
}

impl Display for Requirements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|s| format!("{:?}", s)).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Union of the requirements of a set of actions.
pub(crate) fn union_requirements(actions: &[Box<dyn Action>]) -> Requirements {
    actions
        .iter()
        .fold(Requirements::none(), |r, a| r.union(a.requirements()))
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
