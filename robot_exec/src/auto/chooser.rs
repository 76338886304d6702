//! Autonomous routine chooser, keyed by the option names shown to the drive team

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Trajectory;
use log::info;

use super::{routines, AutoError, AutoParams};
use crate::{
    action::{Action, ActionExt},
    motions::MotionParams,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Every option offered by the chooser, in display order.
const OPTIONS: [(&str, Routine); 11] = [
    ("None", Routine::Nothing),
    ("Score", Routine::Score),
    (
        "Middle Balance",
        Routine::Balance("Middle Balance", "Balance Mid"),
    ),
    ("Middle Score Move", Routine::ScoreMove("Move Middle")),
    (
        "Middle Score Balance",
        Routine::ScoreBalance("Middle Balance", "Balance Mid"),
    ),
    ("Divider Move", Routine::Move("Move Divider")),
    ("Divider Score Move", Routine::ScoreMove("Move Divider")),
    (
        "Divider Score Balance",
        Routine::ScoreBalance("Divider Balance", "Balance"),
    ),
    ("Wall Move", Routine::Move("Move Wall")),
    ("Wall Score Move", Routine::ScoreMove("Move Wall")),
    (
        "Wall Score Balance",
        Routine::ScoreBalance("Wall Balance", "Balance"),
    ),
];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Shape of a routine, with the names of the trajectories it follows.
#[derive(Debug, Clone, Copy)]
enum Routine {
    Nothing,
    Score,
    Move(&'static str),
    ScoreMove(&'static str),
    Balance(&'static str, &'static str),
    ScoreBalance(&'static str, &'static str),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct AutoChooser {
    motions: MotionParams,
    params: AutoParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AutoChooser {
    /// Create a new chooser.
    ///
    /// Fails if the default routine is not one of the options, or if any option follows a
    /// trajectory missing from the parameters.
    pub fn new(motions: MotionParams, params: AutoParams) -> Result<Self, AutoError> {
        let chooser = Self { motions, params };

        for (_, routine) in OPTIONS.iter() {
            for name in routine.trajectory_names() {
                chooser.trajectory(name)?;
            }
        }

        if !OPTIONS
            .iter()
            .any(|(name, _)| *name == chooser.params.default_routine)
        {
            return Err(AutoError::UnknownRoutine(
                chooser.params.default_routine.clone(),
            ));
        }

        Ok(chooser)
    }

    /// Names of every option, in display order.
    pub fn names() -> Vec<&'static str> {
        OPTIONS.iter().map(|(name, _)| *name).collect()
    }

    pub fn default_name(&self) -> &str {
        &self.params.default_routine
    }

    /// Build a fresh instance of the named routine.
    ///
    /// Returns `Ok(None)` for the "None" option.
    pub fn select(&self, name: &str) -> Result<Option<Box<dyn Action>>, AutoError> {
        let routine = OPTIONS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| *r)
            .ok_or_else(|| AutoError::UnknownRoutine(String::from(name)))?;

        info!("Autonomous routine \"{}\" selected", name);

        let m = &self.motions;
        let a = &self.params;

        let action = match routine {
            Routine::Nothing => return Ok(None),
            Routine::Score => routines::auto_score_high(m, a).boxed(),
            Routine::Move(t) => routines::auto_move(self.trajectory(t)?).boxed(),
            Routine::ScoreMove(t) => routines::auto_score_move(m, a, self.trajectory(t)?).boxed(),
            Routine::Balance(t1, t2) => {
                routines::auto_balance(self.trajectory(t1)?, self.trajectory(t2)?).boxed()
            }
            Routine::ScoreBalance(t1, t2) => routines::auto_score_balance(
                m,
                a,
                self.trajectory(t1)?,
                self.trajectory(t2)?,
            )
            .boxed(),
        };

        Ok(Some(action))
    }

    /// Build the routine named as the default in the parameters.
    pub fn select_default(&self) -> Result<Option<Box<dyn Action>>, AutoError> {
        self.select(&self.params.default_routine)
    }

    fn trajectory(&self, name: &str) -> Result<&Trajectory, AutoError> {
        self.params
            .trajectories
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| AutoError::UnknownTrajectory(String::from(name)))
    }
}

impl Routine {
    fn trajectory_names(&self) -> Vec<&'static str> {
        match *self {
            Routine::Nothing | Routine::Score => vec![],
            Routine::Move(t) | Routine::ScoreMove(t) => vec![t],
            Routine::Balance(t1, t2) | Routine::ScoreBalance(t1, t2) => vec![t1, t2],
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
