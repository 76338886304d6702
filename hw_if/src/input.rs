//! # Operator input and feedback
//!
//! Operator input is polled once per control cycle, never delivered as events. Both gamepads are
//! sampled together into an [`OperatorInput`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// State of one gamepad at the moment it was sampled.
///
/// Stick axes are in the range [-1, 1], with up/forward being negative as reported by the
/// controller. Triggers are in the range [0, 1].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GamepadState {
    pub left_x: f64,
    pub left_y: f64,
    pub right_x: f64,
    pub right_y: f64,

    pub left_trigger: f64,
    pub right_trigger: f64,

    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,

    pub left_bumper: bool,
    pub right_bumper: bool,

    pub back: bool,
    pub start: bool,

    /// Direction pad angle in degrees, `None` when released.
    pub pov: Option<u16>,
}

/// All operator input for one control cycle.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OperatorInput {
    pub driver: GamepadState,
    pub manipulator: GamepadState,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum InputParseError {
    #[error("Operator input contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Haptic feedback to the operators.
pub trait OperatorFeedback {
    /// Set the rumble strength of both controllers, in the range [0, 1].
    fn set_rumble(&mut self, strength: f64);
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GamepadState {
    /// True if the direction pad is held at exactly the given angle.
    pub fn is_pov(&self, angle: u16) -> bool {
        self.pov == Some(angle)
    }
}

impl OperatorInput {
    /// Parse operator input from a JSON object.
    ///
    /// Missing fields take their released/centred values.
    pub fn from_json(json_str: &str) -> Result<Self, InputParseError> {
        serde_json::from_str(json_str).map_err(InputParseError::InvalidJson)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
