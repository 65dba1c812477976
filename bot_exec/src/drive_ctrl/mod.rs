//! # Drive control module
//!
//! Drive control executes moves of the two-wheeled differential base. A move
//! is given as a signed distance for each wheel and a duration, and is run by
//! a pair of independent wheel speed controllers sampled at a fixed period.
//! Straight drives and in-place turns are both expressed as moves, turns
//! being equal and opposite wheel distances.
//!
//! Drive control also provides open-loop primitives: short fixed power
//! pulses used for fine corrections, and fixed power drives which run until a
//! number of encoder counts has been reached (or, for
//! [`DriveCtrl::drive_until_stopped`], until the robot is pushed up against
//! something).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod open_loop;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use params::Params;
pub use state::*;

use crate::wheel_ctrl::WheelCtrlError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during DriveCtrl operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DriveCtrlError {
    #[error("Recieved an invalid move command: {0:?}")]
    InvalidMove(MoveCommand),

    #[error("Speed must be positive and finite, found {0}")]
    InvalidSpeed(f64),

    #[error("Distance must be finite, found {0}")]
    InvalidDistance(f64),

    #[error("Open-loop power must be finite and non-zero, found {0}")]
    InvalidPower(f64),

    #[error("Both wheels stalled before the move was complete: {0:?}")]
    StallDetected(MoveReport),

    #[error("The move did not complete in the allowed time: {0:?}")]
    Timeout(MoveReport),

    #[error("Wheel controller error: {0}")]
    WheelCtrl(#[from] WheelCtrlError),
}
