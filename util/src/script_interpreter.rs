//! # Operator input script interpreter
//!
//! This module provides an interpreter for operator input scripts, allowing the robot to be
//! driven in teleop without a gamepad. A script is a list of timestamped frames:
//!
//! ```text
//! 0.0: {"manipulator": {"pov": 90}};
//! 2.5: {};
//! ```
//!
//! Each frame replaces the whole operator input, any field not given taking its released value.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use thiserror::Error;

// Internal
use hw_if::input::{InputParseError, OperatorInput};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Operator input which is scripted to occur at a specific time.
struct Frame {
    /// The time the frame is applied at
    exec_time_s: f64,

    /// The input to apply
    input: OperatorInput,
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending` every cycle to
/// acquire the frame which has become due, if any.
pub struct ScriptInterpreter {
    frames: VecDeque<Frame>,
    duration_s: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)"
    )]
    InvalidTimestamp(String),

    #[error("Script contains invalid operator input at {0} s: {1}")]
    InvalidInput(f64, InputParseError),

    #[error("Could not build the script parser: {0}")]
    RegexError(regex::Error),
}

pub enum PendingInput {
    /// No new frame this cycle, the previous input still holds
    None,

    /// The latest frame which became due this cycle
    Some(OperatorInput),

    /// All frames have been consumed
    EndOfScript,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = script_path.as_ref();

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path.display().to_string()));
        }

        let script = fs::read_to_string(path).map_err(ScriptError::ScriptLoadError)?;

        Self::from_script(&script)
    }

    /// Create a new interpreter from the text of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        let mut frames: VecDeque<Frame> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(ScriptError::RegexError)?;

        for cap in re.captures_iter(script) {
            let time_str = cap.get(1).map_or("", |m| m.as_str());
            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{} ({})", time_str, e)))?;

            // The scripts contain JSON only.
            let input = OperatorInput::from_json(cap.get(3).map_or("", |m| m.as_str()))
                .map_err(|e| ScriptError::InvalidInput(exec_time_s, e))?;

            frames.push_back(Frame { exec_time_s, input });
        }

        if frames.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        // Frames are applied in time order whatever order they were written in
        frames
            .make_contiguous()
            .sort_by(|a, b| a.exec_time_s.total_cmp(&b.exec_time_s));

        let duration_s = frames.back().map_or(0.0, |f| f.exec_time_s);

        Ok(ScriptInterpreter { frames, duration_s })
    }

    /// Get the frame that has become due by `current_time_s`.
    ///
    /// If several frames became due at once only the latest is returned.
    pub fn get_pending(&mut self, current_time_s: f64) -> PendingInput {
        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.frames.is_empty() {
            return PendingInput::EndOfScript;
        }

        let mut latest = None;

        while self
            .frames
            .front()
            .map_or(false, |f| f.exec_time_s <= current_time_s)
        {
            latest = self.frames.pop_front().map(|f| f.input);
        }

        match latest {
            Some(i) => PendingInput::Some(i),
            None => PendingInput::None,
        }
    }

    /// Get the number of frames left in the script
    pub fn get_num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        self.duration_s
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
