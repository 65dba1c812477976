//! Simulation parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the simulated robot.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Wheel speed at full power.
    ///
    /// Units: inches/second
    pub max_wheel_speed_ins: f64,

    /// Speed multiplier of the right motor relative to the left, used to
    /// simulate mismatched motors.
    pub right_motor_gain: f64,

    /// Counts the encoders produce per nominal count of travel. Matching the
    /// drive's count adjustment means commanded distances are covered
    /// exactly.
    pub count_scale: f64,

    /// Units: inches
    pub track_width_in: f64,

    /// Units: inches
    pub dist_per_count_in: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_wheel_speed_ins: 12.0,
            right_motor_gain: 1.0,
            count_scale: 1.03,
            track_width_in: 7.25,
            dist_per_count_in: 6.0 / 242.0,
        }
    }
}
