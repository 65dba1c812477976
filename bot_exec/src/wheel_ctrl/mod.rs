//! # Wheel control module
//!
//! Each drive wheel is controlled by its own incremental PID speed controller.
//! The controller is given the number of encoder counts accumulated since the
//! last sample and the time that has elapsed, from which it measures the
//! wheel's linear speed and adjusts the power demand so that the measured
//! speed tracks the target speed.
//!
//! The controller is incremental: each call adds the PID terms to the power
//! output from the previous call rather than computing the power from
//! scratch. Its state therefore has to be cleared between moves, which is
//! enforced by only exposing the controller through an [`Engaged`] handle
//! that is obtained from [`Wheel::engage`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod pid;
mod stall;
mod wheel;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Gains;
pub use pid::SpeedCtrl;
pub use stall::StallMonitor;
pub use wheel::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum absolute power that can be demanded from a motor.
///
/// Units: percent
pub const MAX_POWER_PCT: f64 = 100.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during WheelCtrl operation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum WheelCtrlError {
    #[error("The time between samples must be positive and finite, found {0} s")]
    InvalidDeltaTime(f64),
}
