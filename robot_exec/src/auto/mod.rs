//! # Autonomous
//!
//! Routines run during the autonomous period, and the chooser used to pick one by name.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod chooser;
pub mod drive;
mod params;
pub mod routines;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use chooser::AutoChooser;
pub use drive::{FollowTrajectory, ZeroHeading};
pub use params::AutoParams;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AutoError {
    #[error("No autonomous routine named \"{0}\"")]
    UnknownRoutine(String),

    #[error("No trajectory named \"{0}\" in the autonomous parameters")]
    UnknownTrajectory(String),
}
