//! Correction control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for correction control.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Heading error within which the heading is considered corrected.
    ///
    /// Units: degrees
    pub heading_tol_deg: f64,

    /// Power of the heading correction pulses.
    ///
    /// Units: percent
    pub pulse_power_pct: f64,

    /// Length of the heading correction pulses.
    ///
    /// Units: seconds
    pub pulse_s: f64,

    /// Power of the axis correction pulses.
    ///
    /// Units: percent
    pub axis_pulse_power_pct: f64,

    /// Length of the axis correction pulses.
    ///
    /// Units: seconds
    pub axis_pulse_s: f64,

    /// Time to wait after a pulse or turn before reading the reference.
    ///
    /// Units: seconds
    pub settle_s: f64,

    /// Wheel speed of coarse turns.
    ///
    /// Units: inches/second
    pub turn_speed_ins: f64,

    /// Heading errors at or below this are left to the pulse correction
    /// without a coarse turn first.
    ///
    /// Units: degrees
    pub coarse_min_deg: f64,

    /// Maximum number of coarse turns made by a single turn and correct.
    pub max_coarse_turns: usize,

    /// Maximum number of pulses in a single correction.
    pub max_iterations: usize,

    /// Position error within which an axis is considered corrected.
    ///
    /// Units: course units (inches)
    pub axis_tol: f64,

    /// Minimum absolute projection of the robot's heading onto an axis for
    /// an axis correction to be attempted.
    pub min_axis_alignment: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            heading_tol_deg: 1.5,
            pulse_power_pct: 15.0,
            pulse_s: 0.05,
            axis_pulse_power_pct: 15.0,
            axis_pulse_s: 0.05,
            settle_s: 0.25,
            turn_speed_ins: 4.0,
            coarse_min_deg: 5.0,
            max_coarse_turns: 3,
            max_iterations: 60,
            axis_tol: 0.25,
            min_axis_alignment: 0.3,
        }
    }
}
