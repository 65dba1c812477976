//! # Correction control module
//!
//! Dead reckoning from the wheel encoders drifts. Correction control
//! re-anchors the robot against the external position reference: it polls
//! the reference for the true pose, works out how far the robot is from
//! where it should be, and nudges it with short fixed power pulses until the
//! error is within tolerance.
//!
//! Every correction loop runs on an iteration budget. A loop which cannot
//! converge, for example because the robot is wedged against something,
//! returns [`CorrCtrlError::CorrectionTimeout`] rather than running forever.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod heading;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use heading::*;
pub use params::Params;
pub use state::*;

use crate::{drive_ctrl::DriveCtrlError, loc::LocError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during CorrCtrl operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorrCtrlError {
    #[error("Correction did not converge after {iterations} iterations, error is still {error:.3}")]
    CorrectionTimeout { iterations: usize, error: f64 },

    #[error(
        "Cannot correct position along the axis, robot heading ({heading_deg:.1} deg) is too \
        close to perpendicular to it"
    )]
    AxisNotAligned { heading_deg: f64 },

    #[error("Localisation error: {0}")]
    Loc(#[from] LocError),

    #[error("Drive control error: {0}")]
    DriveCtrl(#[from] DriveCtrlError),
}
