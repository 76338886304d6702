//! # Robot Executable Parameters
//!
//! This module provide parameters for the robot executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::bindings::TeleopParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotExecParams {
    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// If true each cycle sleeps out the rest of its period, otherwise cycles run back to back
    pub realtime: bool,

    /// If true the arm telemetry is archived to the session directory
    pub archive_tm: bool,

    /// Operator control mapping parameters
    pub teleop: TeleopParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for RobotExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            realtime: true,
            archive_tm: true,
            teleop: TeleopParams::default(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
