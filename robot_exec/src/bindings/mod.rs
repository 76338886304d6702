//! # Trigger bindings
//!
//! A table of conditions over the robot, each bound to a factory building the action to run when
//! the condition changes. The table is polled once per cycle and compared against the previous
//! cycle's values, so edges are only ever seen on cycle boundaries.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod teleop;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;

use crate::{
    action::{Action, ActionId, Scheduler},
    robot::Robot,
};

pub use teleop::{teleop_bindings, TeleopParams};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    /// Schedule on the rising edge, run to completion
    OnTrue,

    /// Schedule on the falling edge, run to completion
    OnFalse,

    /// Schedule on the rising edge, cancel on the falling edge
    WhileTrue,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub type Condition = Box<dyn Fn(&Robot) -> bool>;

pub type ActionFactory = Box<dyn Fn() -> Box<dyn Action>>;

struct Binding {
    name: String,
    kind: TriggerKind,
    condition: Condition,
    factory: ActionFactory,

    /// Value of the condition at the last poll
    last: bool,

    /// Action scheduled by a `WhileTrue` binding, cancelled on the falling edge
    active: Option<ActionId>,
}

#[derive(Default)]
pub struct Bindings {
    bindings: Vec<Binding>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding to the end of the table.
    pub fn bind<C, F>(&mut self, name: &str, kind: TriggerKind, condition: C, factory: F)
    where
        C: Fn(&Robot) -> bool + 'static,
        F: Fn() -> Box<dyn Action> + 'static,
    {
        self.bindings.push(Binding {
            name: String::from(name),
            kind,
            condition: Box::new(condition),
            factory: Box::new(factory),
            last: false,
            active: None,
        });
    }

    pub fn on_true<C, F>(&mut self, name: &str, condition: C, factory: F)
    where
        C: Fn(&Robot) -> bool + 'static,
        F: Fn() -> Box<dyn Action> + 'static,
    {
        self.bind(name, TriggerKind::OnTrue, condition, factory)
    }

    pub fn on_false<C, F>(&mut self, name: &str, condition: C, factory: F)
    where
        C: Fn(&Robot) -> bool + 'static,
        F: Fn() -> Box<dyn Action> + 'static,
    {
        self.bind(name, TriggerKind::OnFalse, condition, factory)
    }

    pub fn while_true<C, F>(&mut self, name: &str, condition: C, factory: F)
    where
        C: Fn(&Robot) -> bool + 'static,
        F: Fn() -> Box<dyn Action> + 'static,
    {
        self.bind(name, TriggerKind::WhileTrue, condition, factory)
    }

    /// Evaluate every condition and feed the edges to the scheduler.
    ///
    /// All conditions are evaluated before any action is scheduled, so every binding sees the
    /// same robot state. Edges are then applied in table order.
    pub fn poll(&mut self, robot: &mut Robot, scheduler: &mut Scheduler) {
        let values: Vec<bool> = self.bindings.iter().map(|b| (b.condition)(robot)).collect();

        for (binding, value) in self.bindings.iter_mut().zip(values) {
            let rising = value && !binding.last;
            let falling = !value && binding.last;
            binding.last = value;

            match binding.kind {
                TriggerKind::OnTrue if rising => {
                    debug!("Binding \"{}\" triggered", binding.name);
                    scheduler.schedule((binding.factory)(), robot);
                }
                TriggerKind::OnFalse if falling => {
                    debug!("Binding \"{}\" triggered", binding.name);
                    scheduler.schedule((binding.factory)(), robot);
                }
                TriggerKind::WhileTrue if rising => {
                    debug!("Binding \"{}\" active", binding.name);
                    binding.active = Some(scheduler.schedule((binding.factory)(), robot));
                }
                TriggerKind::WhileTrue if falling => {
                    debug!("Binding \"{}\" released", binding.name);
                    if let Some(id) = binding.active.take() {
                        scheduler.cancel(id, robot);
                    }
                }
                _ => (),
            }
        }
    }

    /// Forget every condition's previous value and any action the bindings started.
    ///
    /// Used on mode changes, once the scheduler has been cleared.
    pub fn reset(&mut self) {
        for binding in self.bindings.iter_mut() {
            binding.last = false;
            binding.active = None;
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
