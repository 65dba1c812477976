//! # Navigation control module
//!
//! Navigation control drives the robot to absolute points on the course. The
//! robot turns to face the target, then advances in fixed steps, re-reading
//! the position reference and re-correcting its heading after each one, so
//! that drift from the wheels never builds up over a long leg. Once close
//! to the target a single final drive covers the exact remaining distance.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;
mod target;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::Params;
pub use state::*;
pub use target::*;

use crate::{corr_ctrl::CorrCtrlError, drive_ctrl::DriveCtrlError, loc::LocError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during NavCtrl operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavCtrlError {
    #[error("Invalid navigation target: {0:?}")]
    InvalidTarget(NavTarget),

    #[error("Still {remaining_in:.2} in from the target after {steps} steps")]
    StepLimitExceeded { steps: usize, remaining_in: f64 },

    #[error("Could not reach the target, {remaining_in:.2} in remaining after the final approach")]
    TargetNotReached { remaining_in: f64 },

    #[error("Localisation error: {0}")]
    Loc(#[from] LocError),

    #[error("Correction control error: {0}")]
    CorrCtrl(#[from] CorrCtrlError),

    #[error("Drive control error: {0}")]
    DriveCtrl(#[from] DriveCtrlError),
}
