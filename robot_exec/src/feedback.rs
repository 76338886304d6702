//! # Operator feedback
//!
//! Controller rumble patterns, played when the suction gains or loses its grip in teleop.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::{
    action::{Action, ActionExt, Instant, Requirements, Sequential, Subsystem, WaitForDuration},
    robot::Robot,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Length of the single long rumble.
const GOOD_RUMBLE_S: f64 = 1.0;

/// Length of each pulse (and each gap) of the double rumble.
const BAD_PULSE_S: f64 = 0.25;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RumblePattern {
    /// One long rumble, the suction has a grip
    Good,

    /// Two short pulses, the suction has lost its grip
    Bad,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Play a rumble pattern on both controllers.
///
/// The rumble is always switched off when the action ends, even if interrupted mid-pulse.
pub struct RumbleControllers {
    seq: Sequential,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RumbleControllers {
    pub fn new(pattern: RumblePattern) -> Self {
        let seq = match pattern {
            RumblePattern::Good => Sequential::new(
                "RumbleGood",
                vec![
                    set_rumble(1.0).boxed(),
                    WaitForDuration::new(GOOD_RUMBLE_S).boxed(),
                    set_rumble(0.0).boxed(),
                ],
            ),
            RumblePattern::Bad => Sequential::new(
                "RumbleBad",
                vec![
                    set_rumble(1.0).boxed(),
                    WaitForDuration::new(BAD_PULSE_S).boxed(),
                    set_rumble(0.0).boxed(),
                    WaitForDuration::new(BAD_PULSE_S).boxed(),
                    set_rumble(1.0).boxed(),
                    WaitForDuration::new(BAD_PULSE_S).boxed(),
                    set_rumble(0.0).boxed(),
                ],
            ),
        };

        Self { seq }
    }
}

impl Action for RumbleControllers {
    fn name(&self) -> &str {
        self.seq.name()
    }

    fn requirements(&self) -> Requirements {
        self.seq.requirements()
    }

    fn initialize(&mut self, robot: &mut Robot) {
        self.seq.initialize(robot);
    }

    fn execute(&mut self, robot: &mut Robot) {
        self.seq.execute(robot);
    }

    fn is_finished(&self, robot: &Robot) -> bool {
        self.seq.is_finished(robot)
    }

    fn end(&mut self, robot: &mut Robot, interrupted: bool) {
        self.seq.end(robot, interrupted);
        if interrupted {
            robot.feedback.set_rumble(0.0);
        }
    }

    fn active_step(&self) -> String {
        self.seq.active_step()
    }
}

fn set_rumble(strength: f64) -> Instant {
    Instant::new(
        "SetRumble",
        Requirements::none().with(Subsystem::Feedback),
        move |r: &mut Robot| r.feedback.set_rumble(strength),
    )
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
