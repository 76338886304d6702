//! Simulated controller rumble

use hw_if::input::OperatorFeedback;
use log::debug;
use std::{cell::Cell, rc::Rc};

/// Rumble output which only remembers the last strength set.
#[derive(Clone, Default)]
pub struct SimFeedback(Rc<Cell<f64>>);

impl SimFeedback {
    pub fn rumble(&self) -> f64 {
        self.0.get()
    }
}

impl OperatorFeedback for SimFeedback {
    fn set_rumble(&mut self, strength: f64) {
        if strength != self.0.get() {
            debug!("Rumble {:.2}", strength);
        }
        self.0.set(strength);
    }
}
