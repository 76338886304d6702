//! Simulated suction end-effector

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::EndEffector;
use std::{cell::RefCell, rc::Rc};

use super::SimParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Suction cup which builds vacuum over time while enabled over a game piece.
#[derive(Clone)]
pub struct SimSuction(Rc<RefCell<SimSuctionState>>);

struct SimSuctionState {
    /// Time since the suction was enabled, `None` while disabled
    on_time_s: Option<f64>,
    piece_present: bool,
    min_vacuum_delay_s: f64,
    seal_delay_s: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimSuction {
    pub fn new(params: &SimParams) -> Self {
        Self(Rc::new(RefCell::new(SimSuctionState {
            on_time_s: None,
            piece_present: params.piece_present,
            min_vacuum_delay_s: params.min_vacuum_delay_s,
            seal_delay_s: params.seal_delay_s,
        })))
    }

    pub fn step(&self, dt_s: f64) {
        if let Some(t) = self.0.borrow_mut().on_time_s.as_mut() {
            *t += dt_s;
        }
    }

    /// Place or remove the game piece under the cup. Removing it loses the vacuum.
    pub fn set_piece_present(&self, present: bool) {
        self.0.borrow_mut().piece_present = present;
    }

    fn vacuum_after(&self, delay_s: f64) -> bool {
        let state = self.0.borrow();
        match state.on_time_s {
            Some(t) => state.piece_present && t >= delay_s,
            None => false,
        }
    }
}

impl EndEffector for SimSuction {
    fn enable(&mut self) {
        let mut state = self.0.borrow_mut();
        if state.on_time_s.is_none() {
            state.on_time_s = Some(0.0);
        }
    }

    fn disable(&mut self) {
        self.0.borrow_mut().on_time_s = None;
    }

    fn is_enabled(&self) -> bool {
        self.0.borrow().on_time_s.is_some()
    }

    fn has_vacuum_seal(&self) -> bool {
        let delay = self.0.borrow().seal_delay_s;
        self.vacuum_after(delay)
    }

    fn has_min_vacuum(&self) -> bool {
        let delay = self.0.borrow().min_vacuum_delay_s;
        self.vacuum_after(delay)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
